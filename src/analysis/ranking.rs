use super::correlation::CorrelationMatrix;

/// Default number of features kept for display.
pub const DEFAULT_TOP_K: usize = 10;

// ---------------------------------------------------------------------------
// Feature importance
// ---------------------------------------------------------------------------

/// Mean absolute correlation of one feature against every other feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    pub name: String,
    /// Position in the numeric column order.
    pub index: usize,
    pub score: f64,
}

/// Score and sort all features, highest relatedness first.
///
/// The sort is stable: equal scores keep the original column order.
pub fn rank_features(matrix: &CorrelationMatrix) -> Vec<FeatureImportance> {
    let c = matrix.len();
    let mut ranked: Vec<FeatureImportance> = (0..c)
        .map(|i| {
            let score = if c > 1 {
                let total: f64 = (0..c)
                    .filter(|&j| j != i)
                    .map(|j| matrix.get(i, j).abs())
                    .sum();
                total / (c - 1) as f64
            } else {
                0.0
            };
            FeatureImportance {
                name: matrix.names[i].clone(),
                index: i,
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

// ---------------------------------------------------------------------------
// Selected top-K set
// ---------------------------------------------------------------------------

/// The top-K features and their K×K sub-matrix, in importance order.
///
/// This is the only matrix the grid ever shows. Smaller display sizes are
/// prefixes of it obtained through [`SelectedFeatureSet::view`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedFeatureSet {
    pub names: Vec<String>,
    /// Human-readable names, see [`display_label`].
    pub labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl SelectedFeatureSet {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// The leading `n`×`n` block, `n` clamped to the selection size.
    pub fn view(&self, n: usize) -> SelectionView<'_> {
        SelectionView {
            set: self,
            n: n.min(self.len()),
        }
    }
}

/// Take the first `k` ranked features and slice their sub-matrix.
pub fn select_top_k(
    matrix: &CorrelationMatrix,
    ranking: &[FeatureImportance],
    k: usize,
) -> SelectedFeatureSet {
    let picked: Vec<&FeatureImportance> = ranking.iter().take(k).collect();

    let values = picked
        .iter()
        .map(|row| picked.iter().map(|col| matrix.get(row.index, col.index)).collect())
        .collect();

    SelectedFeatureSet {
        names: picked.iter().map(|f| f.name.clone()).collect(),
        labels: display_labels(picked.iter().map(|f| f.name.as_str())),
        values,
    }
}

/// Borrowed square prefix of a [`SelectedFeatureSet`].
#[derive(Debug, Clone, Copy)]
pub struct SelectionView<'a> {
    set: &'a SelectedFeatureSet,
    n: usize,
}

impl<'a> SelectionView<'a> {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn label(&self, i: usize) -> &'a str {
        &self.set.labels[i]
    }

    pub fn labels(&self) -> &'a [String] {
        &self.set.labels[..self.n]
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.set.value(i, j)
    }
}

// ---------------------------------------------------------------------------
// Display-size menu
// ---------------------------------------------------------------------------

/// Menu entries that fit the selection. Falls back to the selection size
/// when every configured entry is too large.
pub fn display_size_options(menu: &[usize], selected: usize) -> Vec<usize> {
    if selected == 0 {
        return Vec::new();
    }
    let mut sizes: Vec<usize> = menu
        .iter()
        .copied()
        .filter(|&s| s >= 1 && s <= selected)
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.is_empty() {
        sizes.push(selected);
    }
    sizes
}

/// Strip a trailing parenthesized qualifier: `AUX(participant)` → `AUX`.
pub fn display_label(name: &str) -> String {
    let trimmed = name.trim();
    if let Some(open) = trimmed.rfind('(') {
        if trimmed.ends_with(')') {
            let head = trimmed[..open].trim_end();
            if !head.is_empty() {
                return head.to_string();
            }
        }
    }
    trimmed.to_string()
}

/// [`display_label`] for a set of names, keeping the full name wherever two
/// stripped labels would collide.
pub fn display_labels<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.into_iter().collect();
    let stripped: Vec<String> = names.iter().map(|n| display_label(n)).collect();

    names
        .iter()
        .zip(&stripped)
        .map(|(name, label)| {
            if stripped.iter().filter(|l| *l == label).count() > 1 {
                name.trim().to_string()
            } else {
                label.clone()
            }
        })
        .collect()
}
