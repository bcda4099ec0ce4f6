//! Error hierarchy for the collaborator-facing layers
//!
//! Only the file and configuration boundary produces errors. The
//! analyzers and the recommendation engine are intentionally
//! infallible: missing data yields a zero summary and malformed rows
//! are dropped during sanitization, so no analysis path has an error
//! to return.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for healthrs operations
#[derive(Debug, Error)]
pub enum HealthRsError {
    /// File import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading sample files
///
/// These cover file-level failures only; a malformed row inside an
/// otherwise readable file is dropped, not raised.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension does not map to a supported format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// The file as a whole could not be parsed
    #[error("Parse error in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// Result type alias for healthrs operations
pub type Result<T> = std::result::Result<T, HealthRsError>;
