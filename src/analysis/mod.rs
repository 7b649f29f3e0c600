/// Correlation engine: matrix, ranking, selection and cell explanations.
///
/// ```text
///   NumericColumns ──► correlation ──► ranking ──► SelectedFeatureSet
///                                                      │
///                                  detail ◄── clicked cell
/// ```

pub mod correlation;
pub mod detail;
pub mod export;
pub mod ranking;

use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::data::classify::{ColumnClassification, classify_columns, numeric_columns};
use crate::data::model::RawTable;
use crate::error::AnalysisError;

use correlation::CorrelationMatrix;
use ranking::{FeatureImportance, SelectedFeatureSet, rank_features, select_top_k};

// ---------------------------------------------------------------------------
// One complete analysis of a loaded dataset
// ---------------------------------------------------------------------------

/// Result of one load cycle. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalysis {
    pub source: Option<PathBuf>,
    pub row_count: usize,
    pub columns: Vec<ColumnClassification>,
    /// `None` when the pipeline short-circuited.
    pub matrix: Option<CorrelationMatrix>,
    pub ranking: Vec<FeatureImportance>,
    pub selection: SelectedFeatureSet,
    /// Why the selection is empty, if it is.
    pub issue: Option<AnalysisError>,
}

impl CorrelationAnalysis {
    pub fn numeric_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_numeric).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.columns.iter().filter(|c| c.excluded).count()
    }

    /// Inspected but below the coverage threshold.
    pub fn rejected(&self) -> impl Iterator<Item = &ColumnClassification> {
        self.columns.iter().filter(|c| !c.excluded && !c.is_numeric)
    }

    pub fn has_grid(&self) -> bool {
        !self.selection.is_empty()
    }
}

/// Classify, correlate and rank a freshly loaded table.
///
/// Never fails: an empty table or fewer than two numeric columns yield an
/// analysis with an empty selection and `issue` set.
pub fn analyze(table: &RawTable, config: &EngineConfig) -> CorrelationAnalysis {
    let columns = classify_columns(table, &config.excluded_columns, config.coverage_threshold);
    let mut analysis = CorrelationAnalysis {
        row_count: table.len(),
        ..Default::default()
    };

    if table.is_empty() {
        log::warn!("Dataset has no rows; nothing to correlate");
        analysis.columns = columns;
        analysis.issue = Some(AnalysisError::EmptyDataset);
        return analysis;
    }

    let numeric = numeric_columns(&columns);
    analysis.columns = columns;

    let matrix = match CorrelationMatrix::from_columns(&numeric) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("{e}");
            analysis.issue = Some(e);
            return analysis;
        }
    };

    let ranking = rank_features(&matrix);
    let selection = select_top_k(&matrix, &ranking, config.top_k);

    log::info!(
        "Correlated {} numeric columns over {} rows; top {} selected",
        matrix.len(),
        table.len(),
        selection.len()
    );

    analysis.matrix = Some(matrix);
    analysis.ranking = ranking;
    analysis.selection = selection;
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_delimited;

    fn config() -> EngineConfig {
        EngineConfig {
            excluded_columns: vec!["id".into()],
            ..EngineConfig::default()
        }
    }

    #[test]
    fn abc_scenario() {
        let csv = "id,A,B,C\n1,1,2,4\n2,2,4,3\n3,3,6,2\n4,4,8,1\n";
        let table = parse_delimited(csv.as_bytes(), b',').unwrap();
        let a = analyze(&table, &config());

        assert_eq!(a.numeric_count(), 3);
        assert_eq!(a.excluded_count(), 1);
        assert!(a.columns[0].excluded);

        let m = a.matrix.as_ref().unwrap();
        let index_of = |name: &str| m.names.iter().position(|n| n == name);
        let (ia, ib, ic) = (
            index_of("A").unwrap(),
            index_of("B").unwrap(),
            index_of("C").unwrap(),
        );
        assert!((m.get(ia, ib) - 1.0).abs() < 1e-12);
        assert!((m.get(ia, ic) + 1.0).abs() < 1e-12);
        assert!((m.get(ib, ic) + 1.0).abs() < 1e-12);
        assert!(index_of("id").is_none());
        assert_eq!(a.selection.names, vec!["A", "B", "C"]);
    }

    #[test]
    fn sparse_column_never_selected() {
        // S parses in 2 of 4 rows.
        let csv = "A,B,S\n1,2,1\n2,3,\n3,5,x\n4,4,7\n";
        let table = parse_delimited(csv.as_bytes(), b',').unwrap();
        let a = analyze(&table, &config());

        assert!(!a.selection.names.iter().any(|n| n == "S"));
        assert_eq!(a.rejected().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["S"]);
    }

    #[test]
    fn fewer_than_two_numeric_columns_short_circuits() {
        let csv = "id,A,label\n1,1,x\n2,2,y\n";
        let table = parse_delimited(csv.as_bytes(), b',').unwrap();
        let a = analyze(&table, &config());

        assert!(a.matrix.is_none());
        assert!(!a.has_grid());
        assert!(a.ranking.is_empty());
        assert_eq!(a.issue, Some(AnalysisError::InsufficientData { numeric: 1 }));
    }

    #[test]
    fn empty_table_reports_empty_dataset() {
        let table = RawTable::new(vec!["A".into(), "B".into()], Vec::new());
        let a = analyze(&table, &config());
        assert_eq!(a.issue, Some(AnalysisError::EmptyDataset));
        assert!(!a.has_grid());
    }

    #[test]
    fn top_k_limits_selection() {
        let csv = "A,B,C,D\n1,2,3,9\n2,1,5,7\n3,4,4,8\n4,3,7,1\n";
        let table = parse_delimited(csv.as_bytes(), b',').unwrap();
        let cfg = EngineConfig {
            top_k: 2,
            ..config()
        };
        let a = analyze(&table, &cfg);
        assert_eq!(a.selection.len(), 2);
        assert_eq!(a.ranking.len(), 4);
        assert_eq!(a.selection.names[0], a.ranking[0].name);
    }
}
