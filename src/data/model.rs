use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// RawRow – one dataset record, fields kept as text
// ---------------------------------------------------------------------------

/// A single record of the source file: column name → raw field text.
///
/// Nothing is interpreted at this stage; numeric inference happens later in
/// [`crate::data::classify`]. Absent columns read as the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw text of a column, empty when the record has no such field.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

// ---------------------------------------------------------------------------
// RawTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed dataset: header order plus every record.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// All records (rows).
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the raw text of one column, row by row.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_as_empty() {
        let row: RawRow = [("a", "1")].into_iter().collect();
        assert_eq!(row.get("a"), "1");
        assert_eq!(row.get("b"), "");
    }

    #[test]
    fn column_iterates_in_row_order() {
        let rows = vec![
            [("x", "1")].into_iter().collect::<RawRow>(),
            RawRow::new(),
            [("x", "3")].into_iter().collect::<RawRow>(),
        ];
        let table = RawTable::new(vec!["x".into()], rows);
        let col: Vec<&str> = table.column("x").collect();
        assert_eq!(col, vec!["1", "", "3"]);
    }
}
