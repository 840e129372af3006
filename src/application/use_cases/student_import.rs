use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::use_cases::column_roles::ColumnRoles;
use crate::domain::error::{AppError, Result};
use crate::domain::student::StudentInput;
use crate::domain::table::TableData;
use crate::infrastructure::db::StudentRepository;
use crate::infrastructure::parse::{parse_workbook, CsvTableParser};

pub struct StudentImportUseCase {
    repository: Arc<StudentRepository>,
}

impl StudentImportUseCase {
    pub fn new(repository: Arc<StudentRepository>) -> Self {
        Self { repository }
    }

    /// Import an uploaded file: parse it into a table, infer column roles,
    /// validate rows and insert the survivors as one batch. Returns the
    /// number of submitted records; rows failing validation are dropped
    /// without per-row error reporting.
    pub async fn execute(&self, file_name: &str, bytes: &[u8]) -> Result<usize> {
        info!(file_name, size = bytes.len(), "Starting student import");

        let table = parse_table(file_name, bytes)?;
        let roles = ColumnRoles::infer(&table)?;

        let mut accepted = Vec::new();
        let mut dropped = 0usize;
        for row in 0..table.row_count() {
            match candidate_from_row(&table, &roles, row) {
                Some(input) => accepted.push(input),
                None => dropped += 1,
            }
        }

        if accepted.is_empty() {
            warn!(file_name, dropped, "Upload contained no valid student rows");
            return Err(AppError::NoValidData(
                "no rows passed validation".to_string(),
            ));
        }

        let submitted = accepted.len();
        let affected = self.repository.insert_students(&accepted).await?;
        info!(file_name, submitted, affected, dropped, "Student import committed");

        Ok(submitted)
    }
}

fn parse_table(file_name: &str, bytes: &[u8]) -> Result<TableData> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => CsvTableParser::new().parse(bytes),
        "xlsx" | "xls" => parse_workbook(bytes),
        _ => Err(AppError::UnsupportedFormat(format!(
            "'{}' is not an importable file",
            file_name
        ))),
    }
}

/// Build a candidate record from one row, or reject the row.
/// Name and standard must be truthy; every marks cell must be a truthy
/// number. Text in a marks column rejects the row rather than being
/// coerced.
fn candidate_from_row(table: &TableData, roles: &ColumnRoles, row: usize) -> Option<StudentInput> {
    let name = table.cell(roles.name, row)?;
    let standard = table.cell(roles.standard, row)?;
    if !name.is_truthy() || !standard.is_truthy() {
        return None;
    }

    let mut marks = Vec::with_capacity(roles.marks.len());
    for &column in &roles.marks {
        let cell = table.cell(column, row)?;
        if !cell.is_truthy() {
            return None;
        }
        marks.push(cell.as_number()?);
    }

    Some(StudentInput {
        name: name.to_text(),
        standard: standard.to_text(),
        marks,
    })
}
