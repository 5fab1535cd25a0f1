//! Selection of the column holding the figures of a sheet.

use crate::models::config::ScanConfig;
use crate::models::workbook::Sheet;

use super::numeric::clean_numeric;

/// Window sizes and markers used by [`find_value_column`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeuristics {
    /// Rows searched for a current-period header.
    pub probe_rows: usize,
    /// Rows between a period header and the figure that confirms it.
    pub probe_offset: usize,
    /// Rows counted per column in the density fallback.
    pub density_rows: usize,
    /// Exclusive upper bound on columns ranked by density.
    pub density_columns: usize,
    /// Lower-cased substrings marking a current-period header.
    pub period_markers: Vec<String>,
}

impl Default for ColumnHeuristics {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ColumnHeuristics {
    fn from(config: &ScanConfig) -> Self {
        Self {
            probe_rows: config.probe_rows,
            probe_offset: config.probe_offset,
            density_rows: config.density_rows,
            density_columns: config.density_columns,
            period_markers: config
                .period_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }
}

/// Pick the column whose cells hold the figures to extract.
///
/// First looks for a current-period header with a number `probe_offset`
/// rows below it; otherwise ranks columns `1..density_columns` by how many
/// cells parse as numbers, ties going to the leftmost column. The result is
/// always below `max(1, column_count)`.
pub fn find_value_column(sheet: &Sheet, heuristics: &ColumnHeuristics) -> usize {
    let columns = sheet.column_count();
    if columns < 2 {
        return 0;
    }

    if let Some(col) = probe_period_header(sheet, heuristics) {
        return col;
    }

    let rows = sheet.row_count().min(heuristics.density_rows);
    let mut best_col = 1;
    let mut best_count = 0;

    for col in 1..columns.min(heuristics.density_columns) {
        let count = (0..rows)
            .filter(|&row| clean_numeric(sheet.cell(row, col)).is_some())
            .count();
        if count > best_count {
            best_count = count;
            best_col = col;
        }
    }

    if best_col >= columns { 0 } else { best_col }
}

fn probe_period_header(sheet: &Sheet, heuristics: &ColumnHeuristics) -> Option<usize> {
    let rows = sheet.row_count();
    let columns = sheet.column_count();

    for row in 0..rows.min(heuristics.probe_rows) {
        let Some(target_row) = row
            .checked_add(heuristics.probe_offset)
            .filter(|&target| target < rows)
        else {
            continue;
        };
        for col in 0..columns {
            let text = sheet.cell(row, col).text().to_lowercase();
            let is_header = heuristics
                .period_markers
                .iter()
                .any(|marker| text.contains(marker.as_str()));
            if is_header && clean_numeric(sheet.cell(target_row, col)).is_some() {
                return Some(col);
            }
        }
    }

    None
}

/// Re-validate a column index against the sheet it will be read from.
///
/// Returns `None` for sheets without columns; otherwise clamps to the last
/// valid column.
pub fn clamp_column(index: usize, columns: usize) -> Option<usize> {
    match columns {
        0 => None,
        _ => Some(index.min(columns - 1)),
    }
}
