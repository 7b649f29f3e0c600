use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{RawRow, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a raw dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma separated, header row required
/// * `.tsv`, `.tab` – tab separated, header row required
/// * `.json`        – `[{ "column": value, ... }, ...]`
///
/// Every field is kept as text. A file without data rows is an error.
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            parse_delimited(file, b',')?
        }
        "tsv" | "tab" => {
            let file = std::fs::File::open(path).context("opening TSV file")?;
            parse_delimited(file, b'\t')?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    if table.is_empty() {
        bail!("{} contains no data rows", path.display());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row.
///
/// Ragged records are accepted; fields past the end of a short record read
/// as empty.
pub fn parse_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        bail!("header row is empty");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON records
// ---------------------------------------------------------------------------

/// Expected JSON layout (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "File_ID": "S001", "AUX(participant)": 0.12, "DX1": "MCI" },
///   ...
/// ]
/// ```
///
/// The header is the union of keys in first-seen order.
pub fn parse_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_text(val));
        }
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
