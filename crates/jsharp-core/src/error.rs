//! Error types for jsharp-core.
//!
//! The [`Error`] enum covers the ways an [`Image`](crate::Image) can fail to
//! come into existence: bad dimensions, an unsupported channel count, a
//! sample buffer of the wrong length, or the allocator refusing the request.
//!
//! # Usage
//!
//! ```rust
//! use jsharp_core::{Error, Image, ColorType};
//!
//! let err = Image::from_samples(0, 4, ColorType::Gray, vec![]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or accessing raster buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the buffer size overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Channel count other than 1 (gray) or 3 (RGB).
    #[error("unsupported component count: {0} (expected 1 or 3)")]
    UnsupportedComponents(u32),

    /// Sample buffer length does not equal `width * height * components`.
    #[error("sample buffer has {actual} bytes, expected {expected}")]
    BufferSize {
        /// Required length
        expected: usize,
        /// Provided length
        actual: usize,
    },

    /// Memory allocation failed.
    ///
    /// Returned by the fallible allocation paths ([`Image::try_clone`](crate::Image::try_clone))
    /// instead of aborting the process.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
