//! Error types for the finscan-core library.
//!
//! Classification itself never fails: malformed cells and sheets degrade to
//! empty values. These errors cover caller contract violations and the
//! configuration file layer.

use thiserror::Error;

/// Main error type for the finscan library.
#[derive(Error, Debug)]
pub enum FinscanError {
    /// The caller handed over input that breaks the workbook contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the finscan library.
pub type Result<T> = std::result::Result<T, FinscanError>;
