//! Decoding of spreadsheet files into an in-memory [`Workbook`].

use std::path::Path;

use anyhow::Context;
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::NaiveDateTime;
use tracing::debug;

use finscan_core::{Cell, Sheet, Workbook};

/// Extensions decoded through calamine.
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether a path has an extension the loader understands.
pub fn is_supported(path: &Path) -> bool {
    let extension = extension_of(path);
    extension == "csv" || SPREADSHEET_EXTENSIONS.contains(&extension.as_str())
}

/// Load every sheet of a file, header-less, in declaration order.
pub fn load_workbook(path: &Path) -> anyhow::Result<Workbook> {
    let extension = extension_of(path);
    match extension.as_str() {
        "csv" => load_csv(path),
        ext if SPREADSHEET_EXTENSIONS.contains(&ext) => load_spreadsheet(path),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn load_spreadsheet(path: &Path) -> anyhow::Result<Workbook> {
    let mut source = open_workbook_auto(path)
        .with_context(|| format!("failed to open spreadsheet: {}", path.display()))?;

    let mut workbook = Workbook::new();
    for name in source.sheet_names() {
        let range = source
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet: {name}"))?;
        let sheet = range_to_sheet(&range);
        debug!(
            "Loaded sheet {:?}: {} rows x {} columns",
            name,
            sheet.row_count(),
            sheet.column_count()
        );
        workbook.add_sheet(name, sheet)?;
    }

    Ok(workbook)
}

/// Convert a calamine range into a sheet anchored at cell A1.
///
/// Ranges start at their first used cell, so leading blank rows and
/// columns are restored to keep positional heuristics intact.
fn range_to_sheet(range: &Range<Data>) -> Sheet {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut sheet = Sheet::new();
    for _ in 0..row_offset {
        sheet.push_row(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(convert_cell));
        sheet.push_row(cells);
    }
    sheet
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(_) => data
            .as_datetime()
            .map(|dt| Cell::Text(format_date(dt)))
            .unwrap_or(Cell::Empty),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn format_date(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn load_csv(path: &Path) -> anyhow::Result<Workbook> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;

    let mut sheet = Sheet::new();
    for record in reader.records() {
        let record = record?;
        sheet.push_row(record.iter().map(csv_cell).collect());
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1");

    Ok(Workbook::new().with_sheet(name, sheet)?)
}

fn csv_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(field.to_string()),
    }
}
