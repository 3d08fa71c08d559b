//! Error types for morphoseg

use thiserror::Error;

use crate::grid::Dims;

/// Main error type for morphoseg operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(Dims),

    #[error("Index out of bounds: ({x}, {y}, {z}, {t}, band {band}) in grid of size {dims}")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        z: usize,
        t: usize,
        band: usize,
        dims: Dims,
    },

    #[error("Grid dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: Dims, actual: Dims },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for morphoseg operations
pub type Result<T> = std::result::Result<T, Error>;
