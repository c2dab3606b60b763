//! CLI command implementations

pub mod batch;
pub mod clarity;
pub mod sharpen;

use anyhow::{Context, Result};
use jsharp_core::Image;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    jsharp_io::jpeg::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image, quality: u8) -> Result<()> {
    jsharp_io::jpeg::write(path, image, quality)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// File name for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
