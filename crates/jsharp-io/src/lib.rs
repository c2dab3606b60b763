//! # jsharp-io
//!
//! Image I/O for the jsharp batch sharpener.
//!
//! - [`jpeg`] - JPEG reader/writer built on `jpeg-decoder` / `jpeg-encoder`
//! - [`fs`] - input discovery, output directory creation, atomic writes
//! - [`FormatReader`] / [`FormatWriter`] - codec traits
//!
//! # Example
//!
//! ```rust,ignore
//! use jsharp_io::{fs, jpeg};
//!
//! fs::ensure_dir("data/processed".as_ref())?;
//! for path in fs::find_jpegs("data/raw".as_ref())? {
//!     let image = jpeg::read(&path)?;
//!     jpeg::write(std::path::Path::new("data/processed").join(path.file_name().unwrap()), &image, 95)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod fs;
pub mod jpeg;
mod traits;

pub use error::{IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};
