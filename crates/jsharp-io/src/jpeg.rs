//! JPEG format support.
//!
//! Reads baseline and progressive JPEG into an 8-bit [`Image`] and writes
//! baseline JPEG at a chosen quality.
//!
//! # Architecture
//!
//! - [`JpegReader`] implements [`FormatReader`]
//! - [`JpegWriter`] implements [`FormatWriter`], configured by [`JpegWriterOptions`]
//! - [`read()`] / [`write()`] are convenience wrappers with defaults
//!
//! # Pixel formats
//!
//! | Decoded        | Resulting [`ColorType`] |
//! |----------------|-------------------------|
//! | 8-bit luma     | `Gray`                  |
//! | 16-bit luma    | `Gray` (high byte)      |
//! | RGB            | `Rgb`                   |
//! | CMYK           | `Rgb` (approximate)     |
//!
//! # Examples
//!
//! ```rust,ignore
//! use jsharp_io::jpeg::{JpegWriter, JpegWriterOptions};
//! use jsharp_io::FormatWriter;
//!
//! let image = jsharp_io::jpeg::read("photo.jpg")?;
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("photo_out.jpg", &image)?;
//! ```

use crate::fs::write_atomic;
use crate::{FormatReader, FormatWriter, IoError, IoResult};
use jsharp_core::{ColorType, Image};
use std::io::{BufReader, Cursor};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Quality used by the batch driver.
pub const DEFAULT_QUALITY: u8 = 95;

// ============================================================================
// Writer Options
// ============================================================================

/// Options for writing JPEG files.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level 0-100. Higher = better quality, larger files.
    /// Values below 1 are encoded as 1.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

// ============================================================================
// JpegReader
// ============================================================================

/// JPEG file reader.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }

    fn read_impl<R: std::io::Read>(&self, reader: R) -> IoResult<Image> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = u32::from(info.width);
        let height = u32::from(info.height);
        trace!(width, height, format = ?info.pixel_format, "jpeg::decode");

        let (color_type, samples) = match info.pixel_format {
            jpeg_decoder::PixelFormat::L8 => (ColorType::Gray, pixels),
            jpeg_decoder::PixelFormat::RGB24 => (ColorType::Rgb, pixels),
            jpeg_decoder::PixelFormat::L16 => {
                // Keep the high byte
                let gray = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
                (ColorType::Gray, gray)
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                let rgb = pixels
                    .chunks_exact(4)
                    .flat_map(|cmyk| {
                        let k = 1.0 - f32::from(cmyk[3]) / 255.0;
                        let ch = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
                        [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
                    })
                    .collect();
                (ColorType::Rgb, rgb)
            }
        };

        Ok(Image::from_samples(width, height, color_type, samples)?)
    }
}

impl FormatReader for JpegReader {
    /// Returns "JPEG".
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    /// Returns `["jpg", "jpeg"]`.
    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    /// Checks for JPEG magic bytes (0xFF, 0xD8, 0xFF).
    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= 3 && header[0] == 0xFF && header[1] == 0xD8 && header[2] == 0xFF
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Image> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image> {
        if !self.can_read(data) {
            return Err(IoError::DecodeError("missing JPEG start-of-image marker".into()));
        }
        self.read_impl(Cursor::new(data))
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

// ============================================================================
// JpegWriter
// ============================================================================

/// JPEG file writer.
///
/// Grayscale images are written as single-channel JPEG, RGB as three-channel.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 95).
    pub fn new() -> Self {
        Self::with_options(JpegWriterOptions::default())
    }

    /// Active options.
    pub fn options(&self) -> &JpegWriterOptions {
        &self.options
    }

    fn write_impl(&self, image: &Image) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType as JpegColorType, Encoder};

        let too_large = |v: u32| {
            IoError::EncodeError(format!(
                "dimension {v} exceeds JPEG limit of {}",
                u16::MAX
            ))
        };
        let width = u16::try_from(image.width()).map_err(|_| too_large(image.width()))?;
        let height = u16::try_from(image.height()).map_err(|_| too_large(image.height()))?;

        let color_type = match image.color_type() {
            ColorType::Gray => JpegColorType::Luma,
            ColorType::Rgb => JpegColorType::Rgb,
        };
        let quality = self.options.quality.clamp(1, 100);
        trace!(width, height, quality, "jpeg::encode");

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode(image.samples(), width, height, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

impl FormatWriter<JpegWriterOptions> for JpegWriter {
    /// Returns "JPEG".
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    /// Returns `["jpg", "jpeg"]`.
    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    /// Encodes in memory, then writes through a temp file and rename.
    fn write<P: AsRef<Path>>(&self, path: P, image: &Image) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        write_atomic(path.as_ref(), &data)
    }

    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
        self.write_impl(image)
    }

    fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    JpegReader::new().read(path)
}

/// Writes a JPEG file with the given quality.
pub fn write<P: AsRef<Path>>(path: P, image: &Image, quality: u8) -> IoResult<()> {
    JpegWriter::with_options(JpegWriterOptions { quality }).write(path, image)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(color_type: ColorType) -> Image {
        Image::from_fn(32, 24, color_type, |x, y, c| (x * 6 + y * 3 + c * 20) as u8).unwrap()
    }

    #[test]
    fn test_rgb_roundtrip_shape() {
        let image = gradient(ColorType::Rgb);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        assert!(JpegReader::new().can_read(&bytes));

        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert!(loaded.same_shape(&image));
    }

    #[test]
    fn test_gray_stays_gray() {
        let image = gradient(ColorType::Gray);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.color_type(), ColorType::Gray);
        assert_eq!(loaded.width(), 32);
        assert_eq!(loaded.height(), 24);
    }

    #[test]
    fn test_high_quality_is_close() {
        let image = Image::filled(16, 16, ColorType::Rgb, 128).unwrap();
        let bytes = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(&image)
            .unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        for (&a, &b) in image.samples().iter().zip(loaded.samples()) {
            assert!((i16::from(a) - i16::from(b)).abs() <= 2);
        }
    }

    #[test]
    fn test_quality_affects_size() {
        let image = gradient(ColorType::Rgb);
        let low = JpegWriter::with_options(JpegWriterOptions { quality: 10 })
            .write_to_memory(&image)
            .unwrap();
        let high = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(&image)
            .unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_quality_zero_is_accepted() {
        let image = gradient(ColorType::Gray);
        let writer = JpegWriter::with_options(JpegWriterOptions { quality: 0 });
        assert!(writer.write_to_memory(&image).is_ok());
    }

    #[test]
    fn test_rejects_non_jpeg() {
        let err = JpegReader::new().read_from_memory(b"not a jpeg at all").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));

        // Valid magic, truncated body
        let err = JpegReader::new()
            .read_from_memory(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00])
            .unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let image = Image::filled(70_000, 1, ColorType::Gray, 0).unwrap();
        let err = JpegWriter::new().write_to_memory(&image).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }
}
