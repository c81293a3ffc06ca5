//! Row and cell types shared by all engines.
//!
//! Values stay in the raw textual form the engine delivered them in; typed
//! decoding happens on demand at the point of use, so parse cost and parse
//! failures are deferred to the caller that actually wants a number.

use serde::{Deserialize, Serialize};

use crate::error::CellError;

/// A single column value from a result row.
///
/// SQLite delivers row data in text mode at this layer, so the stored
/// representation is either the raw text form or an explicit NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// SQL NULL.
    Null,
    /// The engine's textual form of the value.
    Text(String),
}

impl CellValue {
    /// Returns true if the cell holds SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Passthrough of the stored textual form.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::Null`] if the cell holds SQL NULL.
    pub fn as_text(&self) -> Result<&str, CellError> {
        match self {
            CellValue::Text(value) => Ok(value),
            CellValue::Null => Err(CellError::Null { target: "text" }),
        }
    }

    /// Parses the stored text as an unsigned 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::Null`] on NULL and [`CellError::Parse`] when the
    /// text is not a valid decimal in range.
    pub fn as_u32(&self) -> Result<u32, CellError> {
        self.parse("u32")
    }

    /// Parses the stored text as an unsigned 64-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::Null`] on NULL and [`CellError::Parse`] when the
    /// text is not a valid decimal in range.
    pub fn as_u64(&self) -> Result<u64, CellError> {
        self.parse("u64")
    }

    fn parse<T>(&self, target: &'static str) -> Result<T, CellError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        let text = match self {
            CellValue::Text(value) => value,
            CellValue::Null => return Err(CellError::Null { target }),
        };
        text.parse().map_err(|source| CellError::Parse {
            target,
            value: text.clone(),
            source,
        })
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// A single row returned from a SQL statement.
///
/// Column names and values are kept in parallel, in the order the engine
/// produced them, so iteration order always matches engine delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<CellValue>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one (column, value) pair to the row.
    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    /// Gets a cell by column name.
    ///
    /// Column names are unique per row as delivered by the engine; if a
    /// statement aliases two columns to the same name, the first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::MissingColumn`] when the name is not present.
    pub fn get(&self, column: &str) -> Result<&CellValue, CellError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| CellError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Column names in delivery order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// An ordered sequence of rows, in engine delivery order.
///
/// Append-only while an execution populates it, read-only afterward. Owned
/// by the [`crate::Outcome`] that produced it and moved to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rows {
    rows: Vec<Row>,
}

impl Rows {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gets a row by position.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Iterates the rows in delivery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
