//! Type definitions for exported data

use indexmap::IndexMap;
use std::fmt;

/// A single cell value as it will be rendered into the worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell, rendered as an empty inline string
    Empty,
    /// Text value, rendered as an inline string
    Text(String),
    /// Numeric value, rendered as a plain `<v>` cell
    Number(f64),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric payload, if this is a number cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

/// Booleans are exported as the text `true` / `false`
impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Text(b.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// One input record: column name to value, in insertion order
pub type Record = IndexMap<String, CellValue>;

static EMPTY: CellValue = CellValue::Empty;

/// Build a record from `(column, value)` pairs
///
/// ```
/// use excelexport::types::{record, CellValue};
///
/// let r = record([("name", CellValue::from("Alice")), ("age", CellValue::from(30))]);
/// assert_eq!(r.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Ordered sequence of records handed to the exporter
///
/// The column set is taken from the first record. Keys that only appear in
/// later records are ignored, and keys missing from a later record render as
/// empty cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Append a record
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records (data rows)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header columns, in the key order of the first record
    pub fn headers(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|first| first.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Value of `column` in `record`, `Empty` when the key is missing
    pub fn value<'a>(record: &'a Record, column: &str) -> &'a CellValue {
        record.get(column).unwrap_or(&EMPTY)
    }

    /// Parse a JSON array of flat objects, keeping each object's key order
    ///
    /// Strings and numbers map to text and number cells, booleans to the
    /// text `true`/`false`, and `null` to an empty cell. Nested arrays and
    /// objects are rejected.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let rows: Vec<IndexMap<String, serde_json::Value>> = serde_json::from_str(json)?;
        Self::from_json_rows(rows)
    }

    /// Same as [`Dataset::from_json_str`], reading from any `io::Read`
    #[cfg(feature = "json")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> crate::Result<Self> {
        let rows: Vec<IndexMap<String, serde_json::Value>> = serde_json::from_reader(reader)?;
        Self::from_json_rows(rows)
    }

    #[cfg(feature = "json")]
    fn from_json_rows(rows: Vec<IndexMap<String, serde_json::Value>>) -> crate::Result<Self> {
        use crate::error::ExcelError;
        use serde_json::Value;

        let mut records = Vec::with_capacity(rows.len());
        for (row, object) in rows.into_iter().enumerate() {
            let mut record = Record::with_capacity(object.len());
            for (column, value) in object {
                let cell = match value {
                    Value::Null => CellValue::Empty,
                    Value::Bool(b) => CellValue::from(b),
                    Value::String(s) => CellValue::Text(s),
                    Value::Number(n) => match n.as_f64() {
                        Some(f) => CellValue::Number(f),
                        None => {
                            return Err(ExcelError::UnsupportedValue {
                                row,
                                column,
                                kind: "number",
                            })
                        }
                    },
                    Value::Array(_) => {
                        return Err(ExcelError::UnsupportedValue {
                            row,
                            column,
                            kind: "array",
                        })
                    }
                    Value::Object(_) => {
                        return Err(ExcelError::UnsupportedValue {
                            row,
                            column,
                            kind: "object",
                        })
                    }
                };
                record.insert(column, cell);
            }
            records.push(record);
        }

        Ok(Dataset { records })
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::from_records(records)
    }
}
