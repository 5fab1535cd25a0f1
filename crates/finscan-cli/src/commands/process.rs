//! Process command - scan a single spreadsheet statement.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use finscan_core::{HeuristicScanner, ScanResult};

use super::{load_config, scan_file};
use crate::output::{format_result, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (xlsx, xlsm, xlsb, xls, ods or csv)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the headline figures to stderr after scanning
    #[arg(long)]
    show_summary: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Scanning statement...");

    let scanner = HeuristicScanner::with_config(config.scan.clone());
    let result = scan_file(&args.input, &scanner, &config.output)?;

    pb.finish_and_clear();

    let output = format_result(&result, args.format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_summary {
        print_summary(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_summary(result: &ScanResult) {
    eprintln!();
    eprintln!("{} Entity: {}", style("ℹ").blue(), result.entity_name);
    eprintln!(
        "{} Currency: {} | Scale: {}",
        style("ℹ").blue(),
        result.currency,
        result.scale_label
    );
    eprintln!("{} Assets: {}", style("ℹ").blue(), result.total_assets);
    eprintln!("{} Liabilities: {}", style("ℹ").blue(), result.total_liabilities);
    eprintln!("{} Net profit: {}", style("ℹ").blue(), result.net_profit);
}
