use super::model::RawTable;

/// Share of rows that must parse as finite numbers for a column to count as numeric.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.75;

// ---------------------------------------------------------------------------
// Per-column classification
// ---------------------------------------------------------------------------

/// Outcome of numeric inference for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnClassification {
    pub name: String,
    /// Excluded by name; never inspected.
    pub excluded: bool,
    pub is_numeric: bool,
    /// Fraction of rows that parsed to a finite number (0 for excluded columns).
    pub coverage: f64,
    /// One entry per row; `None` where parsing failed. Empty for excluded columns.
    pub values: Vec<Option<f64>>,
}

/// The numeric columns only, in header order, ready for correlation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericColumns {
    pub names: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl NumericColumns {
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Parse one raw field. Non-finite results (`inf`, `NaN`) count as missing.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_excluded(name: &str, excluded: &[String]) -> bool {
    let name = name.trim();
    excluded.iter().any(|e| e.trim().eq_ignore_ascii_case(name))
}

/// Classify every column of `table`.
///
/// A column is numeric when `parsed / rows >= threshold`. Columns named in
/// `excluded` (case-insensitive) are reported but never parsed.
pub fn classify_columns(
    table: &RawTable,
    excluded: &[String],
    threshold: f64,
) -> Vec<ColumnClassification> {
    let total = table.len();

    table
        .headers
        .iter()
        .map(|name| {
            if is_excluded(name, excluded) {
                return ColumnClassification {
                    name: name.clone(),
                    excluded: true,
                    is_numeric: false,
                    coverage: 0.0,
                    values: Vec::new(),
                };
            }

            let values: Vec<Option<f64>> = table.column(name).map(parse_numeric).collect();
            let parsed = values.iter().filter(|v| v.is_some()).count();
            let coverage = if total == 0 {
                0.0
            } else {
                parsed as f64 / total as f64
            };
            let is_numeric = total > 0 && coverage >= threshold;

            log::debug!(
                "column {name:?}: {parsed}/{total} parsed ({:.1}%), numeric={is_numeric}",
                coverage * 100.0
            );

            ColumnClassification {
                name: name.clone(),
                excluded: false,
                is_numeric,
                coverage,
                values,
            }
        })
        .collect()
}

/// Keep only the numeric columns, preserving order.
pub fn numeric_columns(classified: &[ColumnClassification]) -> NumericColumns {
    let mut out = NumericColumns::default();
    for col in classified.iter().filter(|c| c.is_numeric) {
        out.names.push(col.name.clone());
        out.values.push(col.values.clone());
    }
    out
}
