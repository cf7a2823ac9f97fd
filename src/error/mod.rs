//! Error handling for kommundata.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for loading and querying municipality data
#[derive(Debug, thiserror::Error)]
pub enum KommunError {
    /// Error opening or reading a file
    #[error("IO error: {message}{}", path_suffix(.path.as_deref()))]
    Io {
        /// What was being attempted
        message: String,
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: Option<io::Error>,
    },
    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Transport-level failure talking to the record store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The record store answered with a non-success status
    #[error("Record store responded with status {status} for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },
    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Column layout of an extract does not match the record schema
    #[error("Schema error: {0}")]
    Schema(String),
    /// A raw record failed ingestion validation
    #[error("Invalid record {id}: {reason}")]
    Validation {
        /// Record id, or `<missing>` when absent
        id: String,
        /// Why the record was rejected
        reason: String,
    },
    /// Unknown filter or sort field name
    #[error("Unknown field '{0}'")]
    InvalidField(String),
    /// Unknown sort direction
    #[error("Unknown sort order '{0}', expected 'asc' or 'desc'")]
    InvalidSortOrder(String),
    /// Malformed range predicate
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    /// Page size of zero
    #[error("Page size must be at least 1")]
    InvalidPageSize,
    /// Requested municipality does not exist
    #[error("Municipality not found: {0}")]
    NotFound(String),
    /// More ids than a comparison can hold
    #[error("Can compare at most {max} municipalities, got {requested}")]
    TooManyToCompare {
        /// Upper limit
        max: usize,
        /// Number of ids passed
        requested: usize,
    },
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

fn path_suffix(path: Option<&Path>) -> String {
    path.map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl KommunError {
    /// Create an IO error with a message and no source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping the underlying `io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error. Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Create a validation error for a record
    pub fn validation(id: Option<&str>, reason: impl Into<String>) -> Self {
        Self::Validation {
            id: id.filter(|id| !id.is_empty()).unwrap_or("<missing>").to_string(),
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for KommunError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

/// Result type for kommundata operations
pub type Result<T> = std::result::Result<T, KommunError>;
