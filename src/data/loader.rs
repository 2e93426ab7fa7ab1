use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{Cell, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, one record per line
/// * `.json` – `[{ "col": value, ... }, ...]` (records-oriented)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse `path` on a worker thread. The result arrives on the returned
/// channel, after which `on_done` runs (the UI uses it to request a repaint).
pub fn spawn_load<F>(path: PathBuf, on_done: F) -> Receiver<Result<Dataset>>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load_file(&path);
        if let Err(e) = &result {
            log::debug!("Background load of {} failed: {e:#}", path.display());
        }
        // The receiver is gone when a newer load replaced this one.
        let _ = tx.send(result);
        on_done();
    });
    rx
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).with_context(|| format!("opening CSV {}", path.display()))?;
    parse_csv(file)
}

/// CSV layout: header row with column names, then one record per line.
/// Blank lines are skipped and ragged rows are accepted: a short row simply
/// lacks the trailing columns, extra fields are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;

        let mut row = Record::new();
        for (col_idx, value) in record.iter().enumerate().take(headers.len()) {
            row.insert(headers[col_idx].clone(), infer_cell(value));
        }
        records.push(row);
    }

    Ok(Dataset::new(headers, records))
}

/// Numbers at or beyond 2^53 in magnitude are kept as text, since they
/// cannot round-trip through an `f64`.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Type inference for a raw CSV field: empty → Null, then boolean, number,
/// and finally plain text.
pub fn infer_cell(s: &str) -> Cell {
    match s {
        "" => Cell::Null,
        "true" | "TRUE" => Cell::Bool(true),
        "false" | "FALSE" => Cell::Bool(false),
        _ => parse_number(s).unwrap_or_else(|| Cell::String(s.to_string())),
    }
}

/// Accepts `-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?` with surrounding
/// whitespace. Plain digit runs become integers, everything else a float.
fn parse_number(s: &str) -> Option<Cell> {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };

    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    let frac = frac_part.unwrap_or("");
    if !digits(int_part) || !digits(frac) || (int_part.is_empty() && frac.is_empty()) {
        return None;
    }
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if exp.is_empty() || !digits(exp) {
            return None;
        }
    }

    let value: f64 = trimmed.parse().ok()?;
    if value.abs() >= MAX_EXACT_FLOAT {
        return None;
    }
    if frac_part.is_none() && exponent.is_none() {
        trimmed.parse::<i64>().ok().map(Cell::Integer)
    } else {
        Some(Cell::Float(value))
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Braund", "Age": 22, "Survived": 0 },
///   ...
/// ]
/// ```
///
/// The column list is taken from the first object.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        if i == 0 {
            columns = obj.keys().cloned().collect();
        }

        let record: Record = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::new(columns, records))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;
    use std::io::Write;

    const TITANIC_HEAD: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,Fare,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,7.25,S

2,1,1,\"Cumings, Mrs. John Bradley\",female,38,71.2833,C
3,1,3,\"Heikkinen, Miss. Laina\",female,,7.925,S
";

    #[test]
    fn parse_csv_infers_types_and_skips_blank_lines() {
        let ds = parse_csv(TITANIC_HEAD.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.columns,
            vec!["PassengerId", "Survived", "Pclass", "Name", "Sex", "Age", "Fare", "Embarked"]
        );
        let first = &ds.records[0];
        assert_eq!(first.get("Survived"), Some(&Cell::Integer(0)));
        assert_eq!(first.get("Fare"), Some(&Cell::Float(7.25)));
        assert_eq!(
            first.get("Name"),
            Some(&Cell::String("Braund, Mr. Owen Harris".into()))
        );
        assert_eq!(ds.records[2].get("Age"), Some(&Cell::Null));
    }

    #[test]
    fn parse_csv_accepts_short_rows() {
        let ds = parse_csv("a,b,c\n1,2\n".as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(!ds.records[0].contains("c"));
    }

    #[test]
    fn infer_cell_variants() {
        assert_eq!(infer_cell(""), Cell::Null);
        assert_eq!(infer_cell("42"), Cell::Integer(42));
        assert_eq!(infer_cell("-3.5"), Cell::Float(-3.5));
        assert_eq!(infer_cell("1e3"), Cell::Float(1000.0));
        assert_eq!(infer_cell("TRUE"), Cell::Bool(true));
        assert_eq!(infer_cell("false"), Cell::Bool(false));
        assert_eq!(infer_cell("NaN"), Cell::String("NaN".into()));
        assert_eq!(infer_cell("inf"), Cell::String("inf".into()));
        assert_eq!(infer_cell("1-2"), Cell::String("1-2".into()));
        assert_eq!(infer_cell("S"), Cell::String("S".into()));
        assert_eq!(infer_cell(" 7 "), Cell::Integer(7));
        assert_eq!(infer_cell("5."), Cell::Float(5.0));
        assert_eq!(infer_cell(".5"), Cell::Float(0.5));
        assert_eq!(infer_cell("2.5E-1"), Cell::Float(0.25));
    }

    #[test]
    fn infer_cell_keeps_unsafe_numbers_as_text() {
        assert_eq!(infer_cell("+5"), Cell::String("+5".into()));
        assert_eq!(infer_cell("True"), Cell::String("True".into()));
        assert_eq!(infer_cell("1e400"), Cell::String("1e400".into()));
        assert_eq!(infer_cell("-1e400"), Cell::String("-1e400".into()));
        assert_eq!(
            infer_cell("9007199254740993"),
            Cell::String("9007199254740993".into())
        );
        assert_eq!(
            infer_cell("9007199254740991"),
            Cell::Integer(9_007_199_254_740_991)
        );
        assert_eq!(infer_cell("1e"), Cell::String("1e".into()));
        assert_eq!(infer_cell("."), Cell::String(".".into()));
        assert_eq!(infer_cell("-"), Cell::String("-".into()));
    }

    #[test]
    fn text_typed_numbers_change_column_kind() {
        let ds = parse_csv("Ticket,Fare\n+5,1\n+6,2\nx,3\n".as_bytes()).unwrap();
        assert_eq!(ds.column_kind("Ticket"), ColumnKind::Categorical);
        assert_eq!(ds.column_kind("Fare"), ColumnKind::Numeric);
    }

    #[test]
    fn parse_json_records() {
        let ds = parse_json(r#"[{"Age": 22, "Sex": "male", "Fare": 7.25, "Cabin": null}]"#).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.columns.len(), 4);
        assert_eq!(ds.records[0].get("Age"), Some(&Cell::Integer(22)));
        assert_eq!(ds.records[0].get("Cabin"), Some(&Cell::Null));
    }

    #[test]
    fn parse_json_rejects_non_array() {
        let err = parse_json(r#"{"Age": 22}"#).unwrap_err();
        assert!(format!("{err:#}").contains("top-level JSON array"));
    }

    #[test]
    fn load_file_rejects_unknown_extension() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));
    }

    #[test]
    fn spawn_load_delivers_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(TITANIC_HEAD.as_bytes()).unwrap();
        file.flush().unwrap();

        let rx = spawn_load(file.path().to_path_buf(), || {});
        let ds = rx.recv().unwrap().unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn spawn_load_reports_missing_file() {
        let rx = spawn_load(PathBuf::from("/definitely/not/here.csv"), || {});
        let err = rx.recv().unwrap().unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }
}
