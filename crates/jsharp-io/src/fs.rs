//! Filesystem helpers: input discovery, output directory setup, atomic writes.

use crate::{IoError, IoResult};
use glob::{MatchOptions, Pattern};
use std::io::Write;
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// File extensions picked up by [`find_jpegs`].
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Lists regular files in `dir` ending in `.jpg` or `.jpeg` (any case).
///
/// The result is sorted and free of duplicates. Subdirectories are not
/// searched. A missing directory yields an empty list.
pub fn find_jpegs(dir: &Path) -> IoResult<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let base = Pattern::escape(&dir.to_string_lossy());

    let mut files = Vec::new();
    for ext in JPEG_EXTENSIONS {
        let pattern = format!("{base}/*.{ext}");
        trace!(%pattern, "find_jpegs");
        files.extend(
            glob::glob_with(&pattern, options)?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file()),
        );
    }
    files.sort();
    files.dedup();

    debug!(dir = %dir.display(), count = files.len(), "Discovered JPEG files");
    Ok(files)
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> IoResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| IoError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `data` to `path` via a temp file in the same directory and a rename.
///
/// Either the complete file appears at `path` or nothing does; a failure
/// removes the temp file.
pub fn write_atomic(path: &Path, data: &[u8]) -> IoResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".jsharp-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;

    trace!(path = %path.display(), bytes = data.len(), "write_atomic");
    Ok(())
}
