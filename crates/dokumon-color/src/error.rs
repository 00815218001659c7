//! Error types for dokumon-color

use thiserror::Error;

/// Errors that can occur while building color transforms
#[derive(Debug, Error)]
pub enum ColorError {
    /// Matrix coefficients of the wrong shape
    #[error("invalid color matrix: {0}")]
    InvalidMatrix(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
