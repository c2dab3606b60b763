//! # jsharp-core
//!
//! Core raster types shared by every jsharp crate.
//!
//! - [`Image`] - Owned 8-bit raster buffer (row-major, interleaved channels)
//! - [`ColorType`] - Channel layout: grayscale or RGB
//! - [`Error`] / [`Result`] - Construction and allocation failures
//!
//! ## Crate Structure
//!
//! ```text
//! jsharp-core (this crate)
//!    ^
//!    |
//!    +-- jsharp-ops (sharpen, unsharp mask, sharpness metric)
//!    +-- jsharp-io (JPEG decode/encode, file discovery)
//!    +-- jsharp-cli (batch driver)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{ColorType, Image};
