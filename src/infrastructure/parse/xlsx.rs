// ============================================================
// EXCEL WORKBOOK PARSER
// ============================================================
// Read the first worksheet of an uploaded workbook into a table

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, TableData};

/// Parse workbook bytes (.xlsx or .xls) into a table from the first sheet
pub fn parse_workbook(bytes: &[u8]) -> Result<TableData> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::ParseError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found in workbook".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read worksheet range: {}", e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Err(AppError::ParseError("Worksheet has no rows".to_string())),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(TableData::from_rows(headers, rows))
}

fn cell_text(cell: &Data) -> String {
    cell.as_string()
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| format!("{}", cell))
}

/// Map a workbook cell onto a table cell, keeping the native type
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::from_f64(*value),
        Data::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Bool(value) => CellValue::Text(value.to_string()),
        other => CellValue::infer(&cell_text(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/students.xlsx"
    ));

    #[test]
    fn test_parse_workbook_first_sheet() {
        let table = parse_workbook(FIXTURE).unwrap();

        assert_eq!(
            table.headers().collect::<Vec<_>>(),
            vec!["Name", "Standard", "Math", "Science"]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), Some(&CellValue::Text("Alice".to_string())));
        assert_eq!(table.cell(1, 0), Some(&CellValue::Int(5)));
        assert_eq!(table.cell(2, 0), Some(&CellValue::Int(90)));
    }

    #[test]
    fn test_reject_non_workbook_bytes() {
        let err = parse_workbook(b"definitely not a spreadsheet").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
