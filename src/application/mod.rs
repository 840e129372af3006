pub mod use_cases;

pub use use_cases::chart_data::ChartDataUseCase;
pub use use_cases::column_roles::ColumnRoles;
pub use use_cases::student_import::StudentImportUseCase;
