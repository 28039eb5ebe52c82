//! Error types for bench-report-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for bench-report-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to retrieve a results file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request completed with a non-2xx status
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// Network or filesystem failure before any status was available
    #[error("{0}")]
    Transport(String),
}

/// Error types that work in both native and WASM environments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Failed to parse results: {0}")]
    ParseError(String),

    #[error("Bad result at index {index}: {record}")]
    ValidationError { index: usize, record: String },

    #[error("Failed to fetch results: {0}")]
    FetchError(#[from] FetchError),

    #[error("Invalid view parameter: {0}")]
    InvalidParam(String),

    #[error("No benchmark records found in {0}")]
    Empty(String),
}
