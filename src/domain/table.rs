// ============================================================
// TABULAR DATA TYPES
// ============================================================
// Data structures representing parsed spreadsheet/CSV content

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single cell in a parsed table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Classify a raw text cell: integer first, then float, then text
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return CellValue::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return CellValue::Float(value);
        }
        CellValue::Text(trimmed.to_string())
    }

    /// Collapse a float to an integer cell when it has no fractional part.
    /// Spreadsheet formats store every number as a float, so a standard of
    /// 5 arrives as 5.0.
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }

    /// Render the cell as display text; empty cells render as ""
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Int(value) => value.to_string(),
            CellValue::Float(value) => value.to_string(),
            CellValue::Text(value) => value.clone(),
        }
    }

    /// Non-empty, non-zero check used by row validation
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Int(value) => *value != 0,
            CellValue::Float(value) => *value != 0.0,
            CellValue::Text(value) => !value.is_empty(),
        }
    }

    /// Numeric view of the cell, if it has one
    pub fn as_number(&self) -> Option<Number> {
        match self {
            CellValue::Int(value) => Some(Number::from(*value)),
            CellValue::Float(value) => Number::from_f64(*value),
            _ => None,
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    pub header: String,
    pub cells: Vec<CellValue>,
}

/// Column-oriented table parsed from an upload.
/// All columns hold the same number of cells; short source rows are
/// padded with empty cells and long ones are cut at the header width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<TableColumn>,
}

impl TableData {
    /// Build a table from a header row and data rows
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<TableColumn> = headers
            .into_iter()
            .map(|header| TableColumn {
                header,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Self { columns }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.header.as_str())
    }

    /// Number of data rows (columns are equal length by construction)
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|column| column.cells.len())
            .unwrap_or(0)
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&CellValue> {
        self.columns
            .get(column)
            .and_then(|column| column.cells.get(row))
    }
}
