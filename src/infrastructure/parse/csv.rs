// ============================================================
// CSV TABLE PARSER
// ============================================================
// Parse CSV uploads into tables with typed cells

use csv::{ReaderBuilder, Trim};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, TableData};

use super::decode_bytes;

/// CSV parser for uploaded files
pub struct CsvTableParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from headers and values
    trim: bool,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvTableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw upload bytes into a table
    pub fn parse(&self, bytes: &[u8]) -> Result<TableData> {
        let content = decode_bytes(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<TableData> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|header| header.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let cells = (0..headers.len())
                .map(|idx| CellValue::infer(record.get(idx).unwrap_or("")))
                .collect();
            rows.push(cells);
        }

        Ok(TableData::from_rows(headers, rows))
    }
}
