//! Sharpening filters and 3x3 convolution.
//!
//! # Kernels
//!
//! - [`Kernel3::LAPLACIAN_SHARPEN`] - `{-1,-1,-1; -1,9,-1; -1,-1,-1}`, divisor 1
//! - [`Kernel3::BOX_BLUR`] - all ones, divisor 9
//!
//! # Filters
//!
//! - [`sharpen`] - convolution with the Laplacian sharpen kernel
//! - [`box_blur`] - 3x3 mean, truncating integer division
//! - [`unsharp_mask`] - `orig + trunc(amount * (orig - blur))`
//!
//! All filters read the input by reference and return a new [`Image`] of the
//! same shape. Border pixels are copied through; only pixels with a full 3x3
//! neighborhood are filtered, so images narrower or shorter than 3 pixels come
//! back unchanged.
//!
//! # Example
//!
//! ```rust
//! use jsharp_core::{ColorType, Image};
//! use jsharp_ops::filter::{sharpen, unsharp_mask};
//!
//! let src = Image::from_samples(3, 3, ColorType::Gray, vec![
//!     10, 10, 10,
//!     10, 100, 10,
//!     10, 10, 10,
//! ]).unwrap();
//!
//! assert_eq!(sharpen(&src).unwrap().sample(1, 1, 0), 255);
//! assert_eq!(unsharp_mask(&src, 1.0).unwrap().sample(1, 1, 0), 180);
//! ```

use crate::{OpsError, OpsResult};
use jsharp_core::Image;
use std::fmt;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default unsharp mask strength used by the batch driver.
pub const DEFAULT_AMOUNT: f32 = 1.35;

/// Fixed-size 3x3 integer kernel with its normalizing divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3 {
    weights: [[i32; 3]; 3],
    divisor: i32,
}

impl Kernel3 {
    /// Laplacian-type sharpen kernel. Weights sum to 1.
    pub const LAPLACIAN_SHARPEN: Self = Self {
        weights: [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]],
        divisor: 1,
    };

    /// 3x3 mean.
    pub const BOX_BLUR: Self = Self {
        weights: [[1, 1, 1], [1, 1, 1], [1, 1, 1]],
        divisor: 9,
    };

    /// Creates a kernel whose divisor is the sum of its weights.
    ///
    /// Zero-sum kernels (edge detectors) get a divisor of 1. Fails when
    /// `255 * sum(|w|)` does not fit in `i32`.
    ///
    /// ```rust
    /// use jsharp_ops::Kernel3;
    ///
    /// let k = Kernel3::new([[0, -1, 0], [-1, 5, -1], [0, -1, 0]]).unwrap();
    /// assert_eq!(k.divisor(), 1);
    /// assert_eq!(Kernel3::new([[1, 2, 1], [2, 4, 2], [1, 2, 1]]).unwrap().divisor(), 16);
    /// ```
    pub fn new(weights: [[i32; 3]; 3]) -> OpsResult<Self> {
        check_weights(&weights)?;
        let sum = weight_sum(&weights);
        Ok(Self {
            weights,
            divisor: if sum == 0 { 1 } else { sum },
        })
    }

    /// Creates a kernel with an explicit divisor.
    ///
    /// Same weight bound as [`Kernel3::new`]; the divisor must be non-zero.
    pub fn with_divisor(weights: [[i32; 3]; 3], divisor: i32) -> OpsResult<Self> {
        check_weights(&weights)?;
        if divisor == 0 {
            return Err(OpsError::InvalidParameter("kernel divisor must be non-zero".into()));
        }
        Ok(Self { weights, divisor })
    }

    /// Kernel weights, row by row.
    #[inline]
    pub fn weights(&self) -> &[[i32; 3]; 3] {
        &self.weights
    }

    /// Normalizing divisor applied after the weighted sum.
    #[inline]
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// Sum of all weights.
    #[inline]
    pub fn weight_sum(&self) -> i32 {
        weight_sum(&self.weights)
    }
}

/// Largest `sum(|w|)` for which a weighted sum of `u8` samples fits in `i32`.
const MAX_ABS_WEIGHT_SUM: i64 = i32::MAX as i64 / 255;

// With the bound held, every accumulator satisfies |acc| < i32::MAX, so
// neither the sums below nor `acc / divisor` can overflow.
fn check_weights(weights: &[[i32; 3]; 3]) -> OpsResult<()> {
    let abs_sum: i64 = weights.iter().flatten().map(|&w| i64::from(w).abs()).sum();
    if abs_sum > MAX_ABS_WEIGHT_SUM {
        return Err(OpsError::InvalidParameter(format!(
            "kernel weights too large: sum of magnitudes {abs_sum} exceeds {MAX_ABS_WEIGHT_SUM}"
        )));
    }
    Ok(())
}

fn weight_sum(weights: &[[i32; 3]; 3]) -> i32 {
    weights.iter().flatten().sum()
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convolves every interior pixel with `kernel`, copying the border ring.
///
/// Each output sample is `clamp(sum(w * neighbor) / divisor, 0, 255)`, with
/// the division truncating toward zero. Channels are filtered independently.
///
/// Fails only if the output buffer cannot be allocated.
pub fn convolve_interior(src: &Image, kernel: &Kernel3) -> OpsResult<Image> {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let comps = src.components();
    trace!(width, height, comps, divisor = kernel.divisor, "convolve_interior");

    // Output starts as a copy, which already holds the border.
    let mut dst = src.try_clone()?;
    if width < 3 || height < 3 {
        return Ok(dst);
    }

    let stride = src.stride();
    let input = src.samples();
    let out = dst.samples_mut();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for c in 0..comps {
                let mut acc = 0i32;
                for (ky, row) in kernel.weights.iter().enumerate() {
                    let base = (y + ky - 1) * stride + c;
                    for (kx, &w) in row.iter().enumerate() {
                        acc += i32::from(input[base + (x + kx - 1) * comps]) * w;
                    }
                }
                out[y * stride + x * comps + c] = clamp_u8(acc / kernel.divisor);
            }
        }
    }

    Ok(dst)
}

/// Sharpens with [`Kernel3::LAPLACIAN_SHARPEN`].
///
/// # Example
///
/// ```rust
/// use jsharp_core::{ColorType, Image};
/// use jsharp_ops::filter::sharpen;
///
/// let flat = Image::filled(5, 5, ColorType::Rgb, 77).unwrap();
/// // Weights sum to 1, so flat regions are preserved.
/// assert_eq!(sharpen(&flat).unwrap(), flat);
/// ```
pub fn sharpen(src: &Image) -> OpsResult<Image> {
    debug!(width = src.width(), height = src.height(), "Applying Laplacian sharpen");
    convolve_interior(src, &Kernel3::LAPLACIAN_SHARPEN)
}

/// 3x3 mean blur. Remainders of the division by 9 are discarded, not rounded.
pub fn box_blur(src: &Image) -> OpsResult<Image> {
    convolve_interior(src, &Kernel3::BOX_BLUR)
}

/// Unsharp masking with a 3x3 box blur.
///
/// For every sample: `d = orig - blurred`, `out = clamp(orig + trunc(amount * d))`.
/// The border of the blur equals the input border, so `d` is 0 there and
/// border samples pass through.
///
/// `amount = 0` reproduces the input, `1` is classic unsharp masking and
/// larger values over-sharpen. Fails with an allocation error if the blur
/// buffer cannot be reserved; the caller should skip the image.
pub fn unsharp_mask(src: &Image, amount: f32) -> OpsResult<Image> {
    debug!(width = src.width(), height = src.height(), amount, "Applying unsharp mask");

    // The blur buffer becomes the output once each sample is recombined.
    let mut dst = box_blur(src)?;
    for (out, &orig) in dst.samples_mut().iter_mut().zip(src.samples()) {
        let orig = i32::from(orig);
        let diff = orig - i32::from(*out);
        // `as` truncates toward zero and saturates.
        let boost = (amount * diff as f32) as i32;
        *out = clamp_u8(orig.saturating_add(boost));
    }

    Ok(dst)
}

/// Sharpening method selected for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Convolution with [`Kernel3::LAPLACIAN_SHARPEN`].
    Laplacian,
    /// [`unsharp_mask`] with the given strength.
    UnsharpMask {
        /// Strength multiplier for the high-frequency residual.
        amount: f32,
    },
}

impl Default for Method {
    fn default() -> Self {
        Self::UnsharpMask {
            amount: DEFAULT_AMOUNT,
        }
    }
}

impl Method {
    /// Runs the method on `src`.
    pub fn apply(&self, src: &Image) -> OpsResult<Image> {
        match *self {
            Self::Laplacian => sharpen(src),
            Self::UnsharpMask { amount } => unsharp_mask(src, amount),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laplacian => write!(f, "laplacian"),
            Self::UnsharpMask { amount } => write!(f, "unsharp(amount={amount:.2})"),
        }
    }
}
