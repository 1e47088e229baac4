//! Error handling for the population dashboard core.

use std::io;

use arrow::error::ArrowError;

pub mod util;

/// Errors raised by loading, cleaning and reducing the statistics tables
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A data file is missing or unreadable
    #[error("{name} unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    /// A required column is absent after positional renaming
    #[error("Schema error in {table}: {message}")]
    Schema { table: String, message: String },

    /// A named column was requested but is not part of the table
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Error decoding CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading from disk
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error building or filtering Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a schema error for the named table
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Build a source-unavailable error for the named source
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only means the source could not be read
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// A numeric field that could not be parsed and was replaced by a missing value.
///
/// These are collected next to the cleaned table and never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValueCoercionWarning {
    /// Canonical column name
    pub column: String,
    /// Row index within the cleaned table
    pub row: usize,
    /// The raw text that failed to parse
    pub raw: String,
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;
