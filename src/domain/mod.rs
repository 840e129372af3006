pub mod error;
pub mod student;
pub mod table;
