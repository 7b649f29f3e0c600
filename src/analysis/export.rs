use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::ranking::SelectedFeatureSet;

/// Write the selected matrix as CSV.
///
/// Layout: an empty corner cell followed by the feature names, then one row
/// per feature starting with its name. Full column names are written so the
/// file can be joined back against the dataset.
pub fn write_matrix_csv<W: Write>(set: &SelectedFeatureSet, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(set.len() + 1);
    header.push(String::new());
    header.extend(set.names.iter().cloned());
    wtr.write_record(&header).context("writing header")?;

    for (i, name) in set.names.iter().enumerate() {
        let mut record = Vec::with_capacity(set.len() + 1);
        record.push(name.clone());
        record.extend((0..set.len()).map(|j| format!("{:.6}", set.value(i, j))));
        wtr.write_record(&record)
            .with_context(|| format!("writing row {name}"))?;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_matrix(set: &SelectedFeatureSet, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_matrix_csv(set, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::correlation::CorrelationMatrix;
    use crate::analysis::ranking::{rank_features, select_top_k};
    use crate::data::classify::NumericColumns;

    fn selection() -> SelectedFeatureSet {
        let columns = NumericColumns {
            names: vec!["A(participant)".into(), "B".into(), "C".into()],
            values: vec![
                vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
                vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)],
                vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)],
            ],
        };
        let m = CorrelationMatrix::from_columns(&columns).unwrap();
        select_top_k(&m, &rank_features(&m), 10)
    }

    #[test]
    fn writes_square_matrix_with_names() {
        let mut buf = Vec::new();
        write_matrix_csv(&selection(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ",A(participant),B,C");
        assert_eq!(lines[1], "A(participant),1.000000,1.000000,-1.000000");
        assert!(lines[3].starts_with("C,-1.000000"));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");
        export_matrix(&selection(), &path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
