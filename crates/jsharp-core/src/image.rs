//! 8-bit raster buffer.
//!
//! # Memory Layout
//!
//! Samples are stored **row-major**, top-to-bottom, with channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Sample `(x, y, c)` lives at `y * width * components + x * components + c`.
//!
//! # Invariant
//!
//! `samples.len() == width * height * components` always holds. Fields are
//! private and every constructor validates, so no partial image can exist.
//!
//! # Usage
//!
//! ```rust
//! use jsharp_core::{ColorType, Image};
//!
//! let img = Image::from_fn(4, 3, ColorType::Rgb, |x, y, c| (x + y + c) as u8).unwrap();
//! assert_eq!(img.samples().len(), 4 * 3 * 3);
//! assert_eq!(img.sample(2, 1, 0), 3);
//! assert!(img.is_border(0, 1));
//! ```

use crate::{Error, Result};
use std::fmt;

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorType {
    /// Single luma channel.
    Gray,
    /// Three interleaved channels, red/green/blue.
    #[default]
    Rgb,
}

impl ColorType {
    /// Number of samples per pixel.
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
        }
    }

    /// Maps a component count (1 or 3) to a layout.
    pub fn from_components(components: u32) -> Result<Self> {
        match components {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            n => Err(Error::UnsupportedComponents(n)),
        }
    }
}

/// Owned decoded image: `width x height x components` bytes.
///
/// Filters read an `Image` by reference and produce a fresh one, so an input
/// buffer is never mutated while it is being read.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    color_type: ColorType,
    samples: Vec<u8>,
}

impl Image {
    /// Wraps an existing sample buffer.
    ///
    /// Fails when a dimension is zero or `samples` has the wrong length.
    pub fn from_samples(
        width: u32,
        height: u32,
        color_type: ColorType,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let expected = buffer_len(width, height, color_type)?;
        if samples.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            color_type,
            samples,
        })
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, color_type: ColorType, value: u8) -> Result<Self> {
        let len = buffer_len(width, height, color_type)?;
        let mut samples = try_alloc(len)?;
        samples.resize(len, value);
        Self::from_samples(width, height, color_type, samples)
    }

    /// Creates an image by evaluating `f(x, y, c)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, color_type: ColorType, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        let len = buffer_len(width, height, color_type)?;
        let mut samples = try_alloc(len)?;
        let comps = color_type.components();
        for y in 0..height as usize {
            for x in 0..width as usize {
                for c in 0..comps {
                    samples.push(f(x, y, c));
                }
            }
        }
        Self::from_samples(width, height, color_type, samples)
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut samples = try_alloc(self.samples.len())?;
        samples.extend_from_slice(&self.samples);
        Ok(Self {
            width: self.width,
            height: self.height,
            color_type: self.color_type,
            samples,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    #[inline]
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    /// Samples per pixel (1 or 3).
    #[inline]
    pub fn components(&self) -> usize {
        self.color_type.components()
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.components()
    }

    /// All samples, row-major.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable access to the samples. The length cannot change.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consumes the image, returning its sample buffer.
    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Flat index of sample `(x, y, c)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, c: usize) -> usize {
        y * self.stride() + x * self.components() + c
    }

    /// Sample at `(x, y, c)`. Panics when out of range.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.samples[self.index(x, y, c)]
    }

    /// Checked sample access.
    pub fn get(&self, x: u32, y: u32, c: usize) -> Result<u8> {
        if x >= self.width || y >= self.height || c >= self.components() {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.sample(x as usize, y as usize, c))
    }

    /// All channels of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.index(x, y, 0);
        &self.samples[start..start + self.components()]
    }

    /// Samples of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.samples[y * stride..(y + 1) * stride]
    }

    /// Whether `(x, y)` lies on the outermost ring of pixels.
    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width as usize || y + 1 == self.height as usize
    }

    /// Same width, height and layout as `other`.
    #[inline]
    pub fn same_shape(&self, other: &Image) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.color_type == other.color_type
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color_type", &self.color_type)
            .field("samples", &self.samples.len())
            .finish()
    }
}

fn buffer_len(width: u32, height: u32, color_type: ColorType) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "dimensions must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(color_type.components()))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))
}

fn try_alloc(len: usize) -> Result<Vec<u8>> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len)
        .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
    Ok(samples)
}
