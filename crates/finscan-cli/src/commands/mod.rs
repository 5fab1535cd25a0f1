//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use finscan_core::{FinscanConfig, HeuristicScanner, OutputConfig, ScanResult, WorkbookScanner};

use crate::loader::load_workbook;
use crate::output::apply_entity_fallback;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finscan")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FinscanConfig> {
    if let Some(path) = config_path {
        return Ok(FinscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(FinscanConfig::from_file(&default_path)?)
    } else {
        Ok(FinscanConfig::default())
    }
}

/// Decode and scan one file, applying the file-name entity fallback.
pub fn scan_file(
    path: &Path,
    scanner: &HeuristicScanner,
    output: &OutputConfig,
) -> anyhow::Result<ScanResult> {
    let workbook = load_workbook(path)?;
    debug!("{} has {} sheets", path.display(), workbook.len());

    let mut result = scanner.scan(&workbook);
    if output.entity_from_filename {
        apply_entity_fallback(&mut result, path);
    }
    Ok(result)
}
