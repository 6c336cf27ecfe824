//! Raw tabular data as delivered by a source provider

use super::provider::SourceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the cell as an integer entity identifier.
    ///
    /// Accepts integers, integral floats and numeric strings.
    pub fn as_identifier(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f)
                if f.is_finite()
                    && f.fract() == 0.0
                    && *f >= i64::MIN as f64
                    && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::String(s),
            // nested structures are carried as their JSON text
            other => CellValue::String(other.to_string()),
        }
    }
}

/// Ordered columns and rows of raw cells.
///
/// Rows are stored positionally; every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularDataset {
    /// Create an empty dataset with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells in column order.
    pub fn push_row(&mut self, values: Vec<CellValue>) -> Result<(), SourceError> {
        if values.len() != self.columns.len() {
            return Err(SourceError::RowWidth {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    /// Builder form of [`push_row`](Self::push_row).
    pub fn with_row<I, V>(mut self, values: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.push_row(values.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// Append a row given as `(column, value)` pairs.
    ///
    /// Columns not mentioned are `Null`; naming an unknown column is an error.
    pub fn push_record<I, K, V>(&mut self, record: I) -> Result<(), SourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        let mut row = vec![CellValue::Null; self.columns.len()];
        for (column, value) in record {
            let idx = self
                .column_index(column.as_ref())
                .ok_or_else(|| SourceError::UnknownColumn(column.as_ref().to_string()))?;
            row[idx] = value.into();
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }
}
