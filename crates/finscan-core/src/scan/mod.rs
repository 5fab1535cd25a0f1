//! Financial-statement scanning.

pub mod classifier;
pub mod rules;
mod scanner;

pub use scanner::HeuristicScanner;

use crate::models::result::ScanResult;
use crate::models::workbook::Workbook;

/// Trait for workbook scanners.
pub trait WorkbookScanner {
    /// Scan every sheet of a workbook into one aggregated result.
    ///
    /// Never fails: unusable sheets and rows contribute nothing.
    fn scan(&self, workbook: &Workbook) -> ScanResult;
}

/// Scan a workbook with the default heuristics.
pub fn scan(workbook: &Workbook) -> ScanResult {
    HeuristicScanner::new().scan(workbook)
}
