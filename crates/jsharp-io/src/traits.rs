//! Reader/writer traits for image formats.

use crate::IoResult;
use jsharp_core::Image;
use std::path::Path;

/// Trait for image format readers.
pub trait FormatReader<O = ()>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this reader.
    fn extensions(&self) -> &'static [&'static str];

    /// Checks magic bytes.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Image>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image>;

    /// Creates a reader with custom options.
    fn with_options(options: O) -> Self;
}

/// Trait for image format writers.
pub trait FormatWriter<O = ()>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this writer.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to a file path.
    ///
    /// Implementations must not leave a partial file behind on failure.
    fn write<P: AsRef<Path>>(&self, path: P, image: &Image) -> IoResult<()>;

    /// Encodes an image into a byte vector.
    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>>;

    /// Creates a writer with custom options.
    fn with_options(options: O) -> Self;
}
