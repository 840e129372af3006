pub mod chart_data;
pub mod column_roles;
pub mod student_import;
