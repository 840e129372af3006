use crate::domain::error::{AppError, Result};
use crate::domain::table::TableData;

/// Column indices for the three record roles. Marks may cover several
/// columns; name and standard are single columns.
#[derive(Debug, Clone)]
pub struct ColumnRoles {
    pub name: usize,
    pub standard: usize,
    pub marks: Vec<usize>,
}

impl ColumnRoles {
    /// Infer roles from the table headers:
    /// - name: first header containing "name" (case-insensitive)
    /// - standard: first header containing "standard"
    /// - marks: every header that is not exactly "name" or "standard"
    ///
    /// Detection is substring-based while exclusion from marks is
    /// exact-match. A header like "standardized_score" can therefore win
    /// the standard role and still be counted as a marks column.
    pub fn infer(table: &TableData) -> Result<Self> {
        let headers: Vec<String> = table.headers().map(|h| h.to_lowercase()).collect();

        let name = headers.iter().position(|h| h.contains("name"));
        let standard = headers.iter().position(|h| h.contains("standard"));
        let marks: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() != "name" && h.as_str() != "standard")
            .map(|(idx, _)| idx)
            .collect();

        match (name, standard, marks.is_empty()) {
            (Some(name), Some(standard), false) => Ok(Self {
                name,
                standard,
                marks,
            }),
            (name, standard, no_marks) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if standard.is_none() {
                    missing.push("standard");
                }
                if no_marks {
                    missing.push("marks");
                }
                Err(AppError::MissingColumns(format!(
                    "column names not found: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
