//! Rendering of scan results and the file-name fallback for entity names.

use std::path::Path;

use finscan_core::{FieldKey, ScanResult};

/// Output format for scan results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Entity name derived from a file name: everything before the first dot.
pub fn entity_from_filename(path: &Path) -> Option<String> {
    path.file_name()?
        .to_str()?
        .split('.')
        .next()
        .filter(|stem| !stem.is_empty())
        .map(String::from)
}

/// Substitute the file-derived name when no sheet supplied an entity name.
pub fn apply_entity_fallback(result: &mut ScanResult, path: &Path) {
    if result.has_default_entity_name() {
        if let Some(name) = entity_from_filename(path) {
            result.entity_name = name;
        }
    }
}

pub fn format_result(result: &ScanResult, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// CSV header shared by single-file output and batch summaries.
pub const CSV_HEADER: [&str; 9] = [
    "entity_name",
    "reporting_period",
    "currency",
    "scale_label",
    "total_assets",
    "total_liabilities",
    "total_equity",
    "net_profit",
    "other_items",
];

/// One CSV record for a result; other items travel as a JSON array.
pub fn csv_record(result: &ScanResult) -> anyhow::Result<Vec<String>> {
    let mut record = vec![
        result.entity_name.clone(),
        result.reporting_period.clone(),
        result.currency.clone(),
        result.scale_label.clone(),
    ];
    record.extend(FieldKey::ALL.iter().map(|key| result.field(*key).to_string()));
    record.push(serde_json::to_string(&result.other_items)?);
    Ok(record)
}

fn format_csv(result: &ScanResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_record(result)?)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ScanResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entity: {}\n", result.entity_name));
    output.push_str(&format!("Period: {}\n", result.reporting_period));
    output.push_str(&format!(
        "Currency: {} ({})\n",
        result.currency, result.scale_label
    ));
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Total assets:      {}\n", result.total_assets));
    output.push_str(&format!("  Total liabilities: {}\n", result.total_liabilities));
    output.push_str(&format!("  Total equity:      {}\n", result.total_equity));
    output.push_str(&format!("  Net profit:        {}\n", result.net_profit));

    if !result.other_items.is_empty() {
        output.push_str("\nOther items:\n");
        for item in &result.other_items {
            output.push_str(&format!("  {}: {}\n", item.label, item.value));
        }
    }

    output
}
