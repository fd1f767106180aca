//! Error types for the excelexport library

use thiserror::Error;

/// Result type alias for excelexport operations
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Main error type for all export operations
#[derive(Error, Debug)]
pub enum ExcelError {
    /// Error occurred while reading a ZIP package back
    #[error("Failed to read package: {0}")]
    ReadError(String),

    /// ZIP entry name that cannot be stored as a plain ASCII path
    #[error("Invalid ZIP entry name: {0:?}")]
    InvalidEntryName(String),

    /// A count, size or offset does not fit the classic (non-ZIP64) format
    #[error("ZIP limit exceeded: {0}")]
    ZipLimit(String),

    /// NaN or infinite number that has no spreadsheet representation
    #[error("Cell {cell} holds a non-finite number")]
    InvalidNumber { cell: String },

    /// Input value that does not map onto a cell
    #[error("Unsupported {kind} value in row {row}, column '{column}'")]
    UnsupportedValue {
        row: usize,
        column: String,
        kind: &'static str,
    },

    /// Feature not supported
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Base64 payload could not be decoded
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON input could not be parsed
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
