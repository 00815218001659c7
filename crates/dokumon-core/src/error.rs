//! Error types for dokumon-core
//!
//! The transforms themselves are total. The only checked precondition is
//! that a buffer handed in from outside has as many pixels as its declared
//! dimensions say.

use thiserror::Error;

/// Dokumon core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Declared dimensions do not match the supplied pixel data
    #[error(
        "invalid buffer: {width}x{height} requires {expected} elements, got {actual}"
    )]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Width or height is zero
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Two buffers that must be the same size are not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Coordinates outside the buffer
    #[error("index out of bounds: ({x}, {y}) in {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
