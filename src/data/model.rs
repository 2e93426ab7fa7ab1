use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single value in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, mirroring what a type-inferring CSV reader
/// produces for each field.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{i}"),
            // `{}` prints integral floats without a fraction (22.0 → "22").
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::String(s) => write!(f, "{s}"),
            Cell::Null => Ok(()),
        }
    }
}

impl Cell {
    /// Numeric value of the cell, if it is a number and not NaN.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Whether the cell has a numeric type (NaN floats included).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Integer(_) | Cell::Float(_))
    }

    /// Null, empty text and NaN count as missing. Numeric zero and `false`
    /// are real values.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::String(s) => s.is_empty(),
            Cell::Float(v) => v.is_nan(),
            Cell::Integer(_) | Cell::Bool(_) => false,
        }
    }
}

/// Whether an optional cell (absent key or present value) is missing.
pub fn is_missing(cell: Option<&Cell>) -> bool {
    cell.map_or(true, Cell::is_missing)
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One row: column name → cell. Rows merged from another file may lack
/// some columns; absent keys read as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: BTreeMap<String, Cell>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        Record {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – derived per-column classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

// ---------------------------------------------------------------------------
// Preview – which rows of the table to show
// ---------------------------------------------------------------------------

/// Number of rows shown by [`Preview::Head`] and [`Preview::Tail`].
pub const HEAD_TAIL_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    First(usize),
    Head,
    Tail,
    All,
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preview::First(n) => write!(f, "First {n}"),
            Preview::Head => write!(f, "Head"),
            Preview::Tail => write!(f, "Tail"),
            Preview::All => write!(f, "All rows"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table. `columns` keeps header order of the first file and is
/// the column set every report is computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Dataset { columns, records }
    }

    /// Build a dataset from positional rows. Cells beyond the column count
    /// are dropped; short rows leave the trailing columns absent.
    pub fn from_rows<S, R>(columns: &[S], rows: R) -> Self
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Vec<Cell>>,
    {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let records: Vec<Record> = rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect::<Record>())
            .collect();
        Dataset { columns, records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// All cells of one column in row order (`None` where the key is absent).
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Cell>> + 'a {
        self.records.iter().map(move |r| r.get(column))
    }

    /// Numeric, non-NaN values of a column in row order.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.column(column)
            .filter_map(|cell| cell.and_then(Cell::as_f64))
            .collect()
    }

    /// Classify a column by its dominant non-missing type over every row.
    pub fn column_kind(&self, column: &str) -> ColumnKind {
        let (numeric, other) = self
            .column(column)
            .flatten()
            .filter(|cell| !cell.is_missing())
            .fold((0usize, 0usize), |(n, o), cell| {
                if cell.is_numeric() {
                    (n + 1, o)
                } else {
                    (n, o + 1)
                }
            });
        if numeric > 0 && numeric >= other {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Rows selected by a preview mode.
    pub fn preview(&self, preview: Preview) -> &[Record] {
        let n = self.records.len();
        match preview {
            Preview::First(k) => &self.records[..k.min(n)],
            Preview::Head => &self.records[..HEAD_TAIL_ROWS.min(n)],
            Preview::Tail => &self.records[n.saturating_sub(HEAD_TAIL_ROWS)..],
            Preview::All => &self.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            &["A", "B", "C"],
            vec![
                vec![Cell::Integer(0), Cell::String(String::new()), Cell::Null],
                vec![Cell::Float(1.5), Cell::String("x".into()), Cell::Bool(false)],
            ],
        )
    }

    #[test]
    fn zero_and_false_are_not_missing() {
        assert!(!Cell::Integer(0).is_missing());
        assert!(!Cell::Float(0.0).is_missing());
        assert!(!Cell::Bool(false).is_missing());
        assert!(Cell::String(String::new()).is_missing());
        assert!(Cell::Null.is_missing());
        assert!(Cell::Float(f64::NAN).is_missing());
        assert!(is_missing(None));
    }

    #[test]
    fn float_display_drops_integral_fraction() {
        assert_eq!(Cell::Float(22.0).to_string(), "22");
        assert_eq!(Cell::Float(7.25).to_string(), "7.25");
        assert_eq!(Cell::Null.to_string(), "");
    }

    #[test]
    fn from_rows_keeps_column_order() {
        let ds = sample();
        assert_eq!(ds.columns, vec!["A", "B", "C"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].get("A"), Some(&Cell::Float(1.5)));
    }

    #[test]
    fn column_kind_uses_dominant_type() {
        let ds = Dataset::from_rows(
            &["Age", "Name"],
            vec![
                vec![Cell::Null, Cell::String("a".into())],
                vec![Cell::Integer(22), Cell::Integer(5)],
                vec![Cell::Float(38.0), Cell::String("c".into())],
            ],
        );
        assert_eq!(ds.column_kind("Age"), ColumnKind::Numeric);
        assert_eq!(ds.column_kind("Name"), ColumnKind::Categorical);
        assert_eq!(ds.column_kind("Nope"), ColumnKind::Categorical);
    }

    #[test]
    fn numeric_values_skip_nan_and_text() {
        let ds = Dataset::from_rows(
            &["v"],
            vec![
                vec![Cell::Integer(1)],
                vec![Cell::Float(f64::NAN)],
                vec![Cell::String("x".into())],
                vec![Cell::Float(2.5)],
                vec![],
            ],
        );
        assert_eq!(ds.numeric_values("v"), vec![1.0, 2.5]);
    }

    #[test]
    fn preview_windows() {
        let ds = Dataset::from_rows(&["i"], (0..25).map(|i| vec![Cell::Integer(i)]));
        assert_eq!(ds.preview(Preview::First(5)).len(), 5);
        assert_eq!(ds.preview(Preview::First(50)).len(), 25);
        assert_eq!(ds.preview(Preview::Head).len(), 10);
        let tail = ds.preview(Preview::Tail);
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0].get("i"), Some(&Cell::Integer(15)));
        assert_eq!(ds.preview(Preview::All).len(), 25);
    }
}
