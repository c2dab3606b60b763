//! Tenengrad sharpness score.
//!
//! Measures focus as the energy of the Sobel gradient on the luma plane:
//!
//! ```text
//! score = sum over pixels of (gx^2 + gy^2)
//! ```
//!
//! Larger is sharper. Scores are only comparable between images of the same
//! size and content, e.g. a raw frame and its sharpened counterpart.
//!
//! Gradients use a reflect-101 border (`dcb|abcd|cba`), so every pixel
//! contributes, edge pixels included.
//!
//! The luma plane is recomputed from decoded samples (BT.601, rounded), not
//! read from the JPEG's Y component, so scores can differ by a few units of
//! rounding from tools that decode straight to grayscale.

use jsharp_core::{ColorType, Image};
#[allow(unused_imports)]
use tracing::{debug, trace};

type SobelKernel = [[i32; 3]; 3];

const SOBEL_KERNEL_X: SobelKernel = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: SobelKernel = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Converts to an 8-bit luma plane (BT.601 weights, rounded).
///
/// Grayscale input is returned as a copy.
pub fn luma(src: &Image) -> Vec<u8> {
    match src.color_type() {
        ColorType::Gray => src.samples().to_vec(),
        ColorType::Rgb => src
            .samples()
            .chunks_exact(3)
            .map(|px| {
                let r = u32::from(px[0]);
                let g = u32::from(px[1]);
                let b = u32::from(px[2]);
                ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
            })
            .collect(),
    }
}

/// Reflect-101 index into `0..n`: `-1 -> 1`, `n -> n - 2`.
#[inline]
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    let r = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    r as usize
}

/// Computes the Tenengrad score of `src`.
///
/// # Example
///
/// ```rust
/// use jsharp_core::{ColorType, Image};
/// use jsharp_ops::sharpness::tenengrad;
///
/// let flat = Image::filled(16, 16, ColorType::Rgb, 128).unwrap();
/// assert_eq!(tenengrad(&flat), 0.0);
/// ```
pub fn tenengrad(src: &Image) -> f64 {
    let w = src.width() as usize;
    let h = src.height() as usize;
    trace!(w, h, "tenengrad");

    let gray = luma(src);
    let at = |x: usize, y: usize| i32::from(gray[y * w + x]);

    let mut score = 0.0f64;
    for y in 0..h {
        let ys = [
            reflect101(y as isize - 1, h),
            y,
            reflect101(y as isize + 1, h),
        ];
        for x in 0..w {
            let xs = [
                reflect101(x as isize - 1, w),
                x,
                reflect101(x as isize + 1, w),
            ];

            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ky, &yy) in ys.iter().enumerate() {
                for (kx, &xx) in xs.iter().enumerate() {
                    let v = at(xx, yy);
                    gx += v * SOBEL_KERNEL_X[ky][kx];
                    gy += v * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            let (gx, gy) = (f64::from(gx), f64::from(gy));
            score += gx * gx + gy * gy;
        }
    }

    debug!(w, h, score, "Tenengrad score");
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{box_blur, unsharp_mask};
    use approx::assert_relative_eq;

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(0, 5), 0);
        assert_eq!(reflect101(4, 5), 4);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(-1, 2), 1);
        assert_eq!(reflect101(2, 2), 0);
        assert_eq!(reflect101(-1, 1), 0);
        assert_eq!(reflect101(1, 1), 0);
    }

    #[test]
    fn test_luma_weights() {
        let img = Image::from_samples(3, 1, ColorType::Rgb, vec![255, 0, 0, 0, 255, 0, 0, 0, 255])
            .unwrap();
        // 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
        assert_eq!(luma(&img), vec![76, 150, 29]);

        let gray = Image::filled(2, 2, ColorType::Gray, 9).unwrap();
        assert_eq!(luma(&gray), vec![9; 4]);
    }

    #[test]
    fn test_constant_image_scores_zero() {
        let img = Image::filled(9, 7, ColorType::Gray, 200).unwrap();
        assert_eq!(tenengrad(&img), 0.0);
    }

    #[test]
    fn test_horizontal_ramp() {
        // Rows [0, 10, 20, 30]; gx = 4 * (I[x+1] - I[x-1]) with reflect-101:
        // x=0 -> 0, x=1 -> 80, x=2 -> 80, x=3 -> 0. gy = 0. Three rows.
        let img = Image::from_fn(4, 3, ColorType::Gray, |x, _, _| (x * 10) as u8).unwrap();
        assert_relative_eq!(tenengrad(&img), 3.0 * (80.0 * 80.0 * 2.0));
    }

    #[test]
    fn test_transpose_symmetry() {
        let rows = Image::from_fn(4, 3, ColorType::Gray, |x, _, _| (x * 10) as u8).unwrap();
        let cols = Image::from_fn(3, 4, ColorType::Gray, |_, y, _| (y * 10) as u8).unwrap();
        assert_relative_eq!(tenengrad(&rows), tenengrad(&cols));
    }

    #[test]
    fn test_sharpening_raises_score() {
        let img = Image::from_fn(32, 32, ColorType::Rgb, |x, y, c| {
            (((x / 4 + y / 4) % 2) as u8 * 120) + 40 + c as u8
        })
        .unwrap();
        let soft = box_blur(&img).unwrap();
        let crisp = unsharp_mask(&soft, 1.5).unwrap();
        assert!(tenengrad(&soft) < tenengrad(&img));
        assert!(tenengrad(&crisp) > tenengrad(&soft));
    }
}
