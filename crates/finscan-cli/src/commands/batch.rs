//! Batch processing command for multiple statement files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use finscan_core::{HeuristicScanner, ScanResult};

use super::{load_config, scan_file};
use crate::loader::is_supported;
use crate::output::{csv_record, format_result, OutputFormat, CSV_HEADER};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ScanResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One scanner for all workers; every task builds its own ScanResult.
    let scanner = Arc::new(HeuristicScanner::with_config(config.scan.clone()));
    let output_config = Arc::new(config.output.clone());
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = permits.clone().acquire_owned().await?;
        let scanner = scanner.clone();
        let output_config = output_config.clone();

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = scan_file(&path, &scanner, &output_config);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            (index, path, outcome, processing_time_ms)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, path, outcome, processing_time_ms) = joined?;

        match outcome {
            Ok(result) => {
                debug!("Scanned {} in {}ms", path.display(), processing_time_ms);
                results.push((
                    index,
                    ProcessResult {
                        path,
                        result: Some(result),
                        error: None,
                        processing_time_ms,
                    },
                ));
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push((
                        index,
                        ProcessResult {
                            path,
                            result: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        },
                    ));
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for processed in &successful {
            if let Some(result) = &processed.result {
                let output_name = processed
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("statement");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = format_result(result, args.format, config.output.pretty_json)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for processed in &failed {
            println!(
                "  - {}: {}",
                processed.path.display(),
                processed.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for processed in results {
        let filename = processed
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &processed.result {
            Some(result) => {
                record.push("success".to_string());
                record.extend(csv_record(result)?);
            }
            None => {
                record.push("failed".to_string());
                record.extend(CSV_HEADER.iter().map(|_| String::new()));
            }
        }
        record.push(processed.processing_time_ms.to_string());
        record.push(processed.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
