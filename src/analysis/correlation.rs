use crate::data::classify::NumericColumns;
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Pairwise Pearson coefficient
// ---------------------------------------------------------------------------

/// Pearson correlation of two aligned columns with pairwise deletion.
///
/// Rows where either side is `None` are skipped. Returns 0 when fewer than
/// two pairs remain or when either column has zero variance over the pairs,
/// so callers never see NaN. The result is not clamped.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let Some(&(x0, y0)) = pairs.first() else {
        return 0.0;
    };
    if pairs.len() <= 1 {
        return 0.0;
    }
    // A constant side has zero variance even when its mean does not round-trip.
    if pairs.iter().all(|&(a, _)| a == x0) || pairs.iter().all(|&(_, b)| b == y0) {
        return 0.0;
    }

    let nf = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= 0.0 {
        return 0.0;
    }
    cov / denom
}

// ---------------------------------------------------------------------------
// CorrelationMatrix
// ---------------------------------------------------------------------------

/// Square symmetric Pearson matrix aligned with the numeric column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute the full matrix. O(C² · R).
    ///
    /// # Errors
    /// [`AnalysisError::InsufficientData`] with fewer than two columns.
    pub fn from_columns(columns: &NumericColumns) -> Result<Self, AnalysisError> {
        let c = columns.len();
        if c < 2 {
            return Err(AnalysisError::InsufficientData { numeric: c });
        }

        let mut values = vec![vec![0.0; c]; c];
        for i in 0..c {
            // Self-correlation is 1 unless the column is degenerate.
            let own = pearson(&columns.values[i], &columns.values[i]);
            values[i][i] = if own == 0.0 { 0.0 } else { 1.0 };

            for j in (i + 1)..c {
                let r = pearson(&columns.values[i], &columns.values[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            names: columns.names.clone(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(v: &[f64]) -> Vec<Option<f64>> {
        v.iter().copied().map(Some).collect()
    }

    fn columns(cols: Vec<(&str, Vec<Option<f64>>)>) -> NumericColumns {
        NumericColumns {
            names: cols.iter().map(|(n, _)| n.to_string()).collect(),
            values: cols.into_iter().map(|(_, v)| v).collect(),
        }
    }

    #[test]
    fn perfect_linear_relationships() {
        let m = CorrelationMatrix::from_columns(&columns(vec![
            ("A", col(&[1.0, 2.0, 3.0, 4.0])),
            ("B", col(&[2.0, 4.0, 6.0, 8.0])),
            ("C", col(&[4.0, 3.0, 2.0, 1.0])),
        ]))
        .unwrap();

        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((m.get(0, 2) + 1.0).abs() < 1e-12);
        assert!((m.get(1, 2) + 1.0).abs() < 1e-12);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
        }
    }

    #[test]
    fn single_paired_observation_is_zero() {
        let a = vec![Some(1.0), None, None, Some(4.0)];
        let b = vec![Some(2.0), Some(3.0), Some(5.0), None];
        assert_eq!(pearson(&a, &b), 0.0);
    }

    #[test]
    fn zero_variance_is_zero_including_diagonal() {
        let m = CorrelationMatrix::from_columns(&columns(vec![
            ("flat", col(&[5.0, 5.0, 5.0])),
            ("up", col(&[1.0, 2.0, 3.0])),
        ]))
        .unwrap();

        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn constant_fractional_columns_are_zero_variance() {
        for (c, n) in [(0.1, 10), (1.1, 7), (0.3, 3)] {
            let up: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let m = CorrelationMatrix::from_columns(&columns(vec![
                ("flat", col(&vec![c; n])),
                ("up", col(&up)),
            ]))
            .unwrap();

            assert_eq!(m.get(0, 0), 0.0, "diagonal for constant {c} over {n} rows");
            assert_eq!(m.get(0, 1), 0.0);
            assert_eq!(m.get(1, 0), 0.0);
            assert_eq!(m.get(1, 1), 1.0);
        }
    }

    #[test]
    fn constant_after_pairwise_deletion_is_zero() {
        let a = vec![Some(0.1), Some(0.1), Some(9.0), Some(0.1)];
        let b = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        assert_eq!(pearson(&a, &b), 0.0);
    }

    #[test]
    fn missing_values_are_skipped_pairwise() {
        // Without the None rows the two columns are perfectly correlated.
        let a = vec![Some(1.0), None, Some(2.0), Some(3.0), Some(100.0)];
        let b = vec![Some(10.0), Some(-50.0), Some(20.0), Some(30.0), None];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_and_bounded_on_noisy_data() {
        let xs = [0.3, 1.7, 2.2, 3.9, 4.1, 5.6, 6.0, 7.3];
        let ys = [2.0, 1.1, 3.5, 2.9, 5.2, 4.0, 6.8, 6.1];
        let zs = [9.0, 7.5, 8.1, 5.0, 4.4, 4.9, 2.0, 1.5];
        let m = CorrelationMatrix::from_columns(&columns(vec![
            ("x", col(&xs)),
            ("y", col(&ys)),
            ("z", vec![Some(9.0), None, Some(8.1), Some(5.0), None, Some(4.9), Some(2.0), Some(1.5)]),
            ("w", col(&zs)),
        ]))
        .unwrap();

        for i in 0..m.len() {
            for j in 0..m.len() {
                assert_eq!(m.get(i, j).to_bits(), m.get(j, i).to_bits());
                assert!(m.get(i, j).abs() <= 1.0 + 1e-9);
                assert!(!m.get(i, j).is_nan());
            }
        }
    }

    #[test]
    fn fewer_than_two_columns_is_insufficient() {
        let one = columns(vec![("A", col(&[1.0, 2.0]))]);
        assert_eq!(
            CorrelationMatrix::from_columns(&one),
            Err(AnalysisError::InsufficientData { numeric: 1 })
        );
        assert_eq!(
            CorrelationMatrix::from_columns(&NumericColumns::default()),
            Err(AnalysisError::InsufficientData { numeric: 0 })
        );
    }
}
