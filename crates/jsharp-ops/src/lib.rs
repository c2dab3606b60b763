//! # jsharp-ops
//!
//! Pixel-domain operations on 8-bit rasters.
//!
//! # Modules
//!
//! - [`filter`] - 3x3 convolution, Laplacian sharpen, box blur, unsharp mask
//! - [`sharpness`] - Tenengrad sharpness score (Sobel gradient energy)
//!
//! # Example
//!
//! ```rust
//! use jsharp_core::{ColorType, Image};
//! use jsharp_ops::{Method, filter};
//!
//! let img = Image::from_fn(8, 8, ColorType::Rgb, |x, y, _| (x * y * 4) as u8).unwrap();
//! let laplace = filter::sharpen(&img).unwrap();
//! let unsharp = Method::UnsharpMask { amount: 1.0 }.apply(&img).unwrap();
//! assert!(laplace.same_shape(&unsharp));
//! ```
//!
//! # Border Policy
//!
//! Every 3x3 filter here skips the outermost ring of pixels and copies it
//! through unchanged. No neighbor outside the image is ever read.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod sharpness;

pub use error::{OpsError, OpsResult};
pub use filter::{Kernel3, Method};
