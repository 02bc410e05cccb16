//! Error types for persisting and reading the exclusion index

use std::path::PathBuf;
use suppressor_scanner::ScanError;
use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while producing or reading an exclusion index
#[derive(Debug, Error)]
pub enum IndexError {
    /// The scan itself failed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// No output directory could be determined for the round
    #[error("Cannot resolve output root: {0}")]
    OutputRootUnresolved(String),

    /// File I/O error
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the temporary file into place failed
    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A class line is not a valid regex
    #[error("Invalid class pattern on line {line} of {path}: {source}")]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        #[source]
        source: regex::Error,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The marker annotation or value is unusable
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    /// A configured file name is not a bare file name
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Scan(_) => "SCAN_ERROR",
            Self::OutputRootUnresolved(_) => "OUTPUT_ROOT",
            Self::Io { .. } | Self::Persist { .. } => "IO_ERROR",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::Config { .. } | Self::InvalidMarker(_) | Self::InvalidFileName(_) => "CONFIG_ERROR",
        }
    }
}
