//! Error types for I/O operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error (corrupt or non-JPEG input).
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded data does not form a valid image.
    #[error("invalid image: {0}")]
    Image(#[from] jsharp_core::Error),

    /// Bad glob pattern built from a directory path.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Output directory could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    DirectoryCreate {
        /// Directory that was requested
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
