//! Core library for heuristic financial-statement scanning.
//!
//! This crate provides:
//! - An in-memory workbook model (sheets of untyped cells)
//! - Numeric normalization, scale/currency and value-column detection
//! - Bilingual (Indonesian/English) label rules for balance-sheet and
//!   income-statement headline figures
//! - A cross-sheet scanner folding every row into one [`ScanResult`]
//!
//! Apart from the configuration file layer the crate performs no I/O;
//! decoding spreadsheet files into a [`Workbook`] is left to the caller.

pub mod error;
pub mod models;
pub mod scan;

pub use error::{FinscanError, Result};
pub use models::config::{FinscanConfig, OutputConfig, ScanConfig};
pub use models::result::{FieldKey, OtherItem, ScanResult};
pub use models::workbook::{Cell, Sheet, Workbook};
pub use scan::{scan, HeuristicScanner, WorkbookScanner};
