//! Student performance record API with spreadsheet bulk import.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
