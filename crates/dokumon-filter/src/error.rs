//! Error types for dokumon-filter

use thiserror::Error;

/// Errors that can occur while building filters
#[derive(Debug, Error)]
pub enum FilterError {
    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
