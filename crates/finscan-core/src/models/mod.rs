//! Data models: workbook input, scan result output, configuration.

pub mod config;
pub mod result;
pub mod workbook;
