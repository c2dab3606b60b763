//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer construction or allocation failed.
    #[error(transparent)]
    Image(#[from] jsharp_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    /// Returns `true` when the operation failed to allocate a working buffer.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::Image(e) if e.is_allocation_error())
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
