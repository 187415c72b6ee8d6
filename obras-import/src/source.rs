//! In-memory view of a source sheet
//!
//! The importer only ever sees [`SourceTable`]: named columns over rows of
//! loosely typed cells. Where the rows came from (a workbook, a test) is the
//! caller's business.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{ImportError, Result};

/// A loosely typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Text cell, trimmed; whitespace-only text becomes [`CellValue::Empty`]
    pub fn text(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Header row plus data rows
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    /// Create an empty table with the given headers
    ///
    /// Headers are trimmed; on duplicates the first occurrence wins.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .collect();

        let mut index = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            index.entry(header.clone()).or_insert(i);
        }

        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Append a data row; short rows read as blank in the missing cells
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Fail with [`ImportError::MissingColumn`] on the first absent column
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(ImportError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows in sheet order
    pub fn rows(&self) -> impl Iterator<Item = SourceRow<'_>> {
        self.rows.iter().map(move |cells| SourceRow { table: self, cells })
    }
}

/// One data row, addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    table: &'a SourceTable,
    cells: &'a [CellValue],
}

impl<'a> SourceRow<'a> {
    /// Cell under `column`; absent columns and short rows read as blank
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.table
            .index
            .get(column)
            .and_then(|&i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }
}
