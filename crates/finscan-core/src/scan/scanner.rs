//! Cross-sheet scan orchestration.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ScanConfig;
use crate::models::result::{ScanResult, DEFAULT_CURRENCY};
use crate::models::workbook::{Sheet, Workbook};

use super::classifier::{classify_row, OtherKeywords, SheetContext};
use super::rules::column::{clamp_column, find_value_column, ColumnHeuristics};
use super::rules::scale::{detect_scale_and_currency, USD};
use super::WorkbookScanner;

/// Schema-free scanner classifying spreadsheet rows by label heuristics.
///
/// Holds only read-only configuration, so one instance can serve many
/// concurrent scans; each call builds its own [`ScanResult`].
#[derive(Debug, Clone)]
pub struct HeuristicScanner {
    config: ScanConfig,
    columns: ColumnHeuristics,
    keywords: OtherKeywords,
}

impl HeuristicScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a scanner from explicit settings.
    pub fn with_config(config: ScanConfig) -> Self {
        let columns = ColumnHeuristics::from(&config);
        let keywords = OtherKeywords::new(&config.extra_other_keywords);
        Self {
            config,
            columns,
            keywords,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Fold one sheet into `result`; returns the detected currency.
    fn scan_sheet(&self, name: &str, sheet: &Sheet, result: &mut ScanResult) -> Option<&'static str> {
        if sheet.is_empty() {
            debug!("Skipping empty sheet {:?}", name);
            return None;
        }

        let scale = detect_scale_and_currency(sheet, self.config.header_rows);
        if scale.currency == USD {
            result.currency = USD.to_string();
        }
        if scale.is_scaled() {
            result.scale_label = scale.label.clone();
        }

        let selected = find_value_column(sheet, &self.columns);
        let Some(value_column) = clamp_column(selected, sheet.column_count()) else {
            debug!("Skipping sheet {:?} without columns", name);
            return None;
        };

        debug!(
            "Sheet {:?}: {} rows x {} columns, scale {} ({}), currency {}, value column {}",
            name,
            sheet.row_count(),
            sheet.column_count(),
            scale.label,
            scale.multiplier,
            scale.currency,
            value_column
        );

        let ctx = SheetContext {
            multiplier: scale.multiplier,
            value_column,
        };
        for row in 0..sheet.row_count() {
            classify_row(sheet, row, &ctx, &self.keywords, result);
        }

        Some(scale.currency)
    }
}

impl Default for HeuristicScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookScanner for HeuristicScanner {
    fn scan(&self, workbook: &Workbook) -> ScanResult {
        let start = Instant::now();
        let mut result = ScanResult::with_period(self.config.default_reporting_period.clone());
        let mut currency = DEFAULT_CURRENCY;

        for (name, sheet) in workbook.sheets() {
            if self.scan_sheet(name, sheet, &mut result) == Some(USD) {
                currency = USD;
            }
        }

        result.currency = currency.to_string();

        info!(
            "Scanned {} sheets in {:?}: assets {}, liabilities {}, equity {}, net profit {}",
            workbook.len(),
            start.elapsed(),
            result.total_assets,
            result.total_liabilities,
            result.total_equity,
            result.net_profit
        );

        result
    }
}
