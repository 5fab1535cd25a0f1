//! Configuration structures for the scanner and its front ends.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FinscanError, Result};
use crate::models::result::DEFAULT_REPORTING_PERIOD;

/// Main configuration for finscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinscanConfig {
    /// Scanner heuristics.
    pub scan: ScanConfig,

    /// Output rendering.
    pub output: OutputConfig,
}

/// Heuristic scanner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rows of columns 0 and 1 searched for scale/currency hints.
    pub header_rows: usize,

    /// Rows searched for a current-period column header.
    pub probe_rows: usize,

    /// Distance from a period header to the cell that must hold a number.
    pub probe_offset: usize,

    /// Rows counted when ranking columns by numeric density.
    pub density_rows: usize,

    /// Exclusive upper bound on columns ranked by numeric density.
    pub density_columns: usize,

    /// Header substrings marking the current-period column.
    pub period_markers: Vec<String>,

    /// Extra "other item" keywords on top of the built-in list.
    pub extra_other_keywords: Vec<String>,

    /// Reporting period reported when no sheet declares one.
    pub default_reporting_period: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            header_rows: 20,
            probe_rows: 15,
            probe_offset: 3,
            density_rows: 100,
            density_columns: 7,
            period_markers: ["current", "berjalan", "2024", "2025"]
                .into_iter()
                .map(String::from)
                .collect(),
            extra_other_keywords: Vec::new(),
            default_reporting_period: DEFAULT_REPORTING_PERIOD.to_string(),
        }
    }
}

impl ScanConfig {
    /// Reject settings that would make the heuristics meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.probe_offset == 0 {
            return Err(FinscanError::Config(
                "probe_offset must be at least 1".to_string(),
            ));
        }
        if self.period_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(FinscanError::Config(
                "period_markers must not contain blank entries".to_string(),
            ));
        }
        if self.extra_other_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(FinscanError::Config(
                "extra_other_keywords must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output configuration used by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Replace an unknown entity name with the input file name.
    pub entity_from_filename: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            entity_from_filename: true,
        }
    }
}

impl FinscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.scan.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FinscanConfig::default();
        config.scan.extra_other_keywords.push("beban usaha".to_string());
        config.output.pretty_json = false;
        config.save(&path).unwrap();

        assert_eq!(FinscanConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"scan": {"header_rows": 30}}"#).unwrap();

        let config = FinscanConfig::from_file(&path).unwrap();
        assert_eq!(config.scan.header_rows, 30);
        assert_eq!(config.scan.probe_rows, 15);
        assert_eq!(config.scan.default_reporting_period, "2024-12-31");
        assert!(config.output.entity_from_filename);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"scan": {"probe_offset": 0}}"#).unwrap();

        let err = FinscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FinscanError::Config(_)));

        std::fs::write(&path, "not json").unwrap();
        let err = FinscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FinscanError::Json(_)));
    }
}
