//! Batch processing command
//!
//! Per file: decode, sharpen, encode. A file that fails at any stage is
//! reported on stderr and skipped; only failing to create the output
//! directory aborts the run.

use crate::{BatchArgs, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use anyhow::{Context, Result};
use jsharp_core::Image;
use jsharp_io::jpeg::DEFAULT_QUALITY;
use jsharp_ops::{Method, OpsResult};
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

/// Immutable settings shared by every file in a run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for `*.jpg` / `*.jpeg`.
    pub input_dir: PathBuf,
    /// Destination directory; output keeps the input file name.
    pub output_dir: PathBuf,
    /// Filter applied to every image.
    pub method: Method,
    /// JPEG quality for the output.
    pub quality: u8,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            method: Method::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl From<BatchArgs> for BatchConfig {
    fn from(args: BatchArgs) -> Self {
        Self {
            method: args.filter.method(),
            quality: args.filter.quality,
            input_dir: args.input_dir,
            output_dir: args.output_dir,
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written output files.
    pub succeeded: Vec<PathBuf>,
    /// Skipped inputs with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

pub fn run(config: &BatchConfig) -> Result<BatchReport> {
    run_with(config, |image| config.method.apply(image))
}

/// Batch loop with the per-image filter supplied by the caller.
fn run_with<F>(config: &BatchConfig, filter: F) -> Result<BatchReport>
where
    F: Fn(&Image) -> OpsResult<Image>,
{
    trace!(input = %config.input_dir.display(), output = %config.output_dir.display(), method = %config.method, "batch::run");

    jsharp_io::fs::ensure_dir(&config.output_dir).context("Error creating processed directory")?;

    let files = jsharp_io::fs::find_jpegs(&config.input_dir).unwrap_or_else(|e| {
        warn!(dir = %config.input_dir.display(), error = %e, "Cannot scan input directory");
        Vec::new()
    });

    let mut report = BatchReport::default();
    if files.is_empty() {
        println!("No JPEG files found in {}", config.input_dir.display());
        return Ok(report);
    }

    info!(files = files.len(), method = %config.method, quality = config.quality, "Starting batch processing");

    for input in &files {
        match process_file(input, config, &filter) {
            Ok(output) => report.succeeded.push(output),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                debug!(file = %input.display(), "Skipped");
                report.failed.push((input.clone(), format!("{:#}", e)));
            }
        }
    }

    let (success, failed) = (report.succeeded.len(), report.failed.len());
    info!(success, failed, "Batch processing complete");
    println!("Processed: {} success, {} failed", success, failed);

    Ok(report)
}

/// Decodes, filters and encodes one file. Every buffer is dropped on return.
fn process_file<F>(input: &Path, config: &BatchConfig, filter: &F) -> Result<PathBuf>
where
    F: Fn(&Image) -> OpsResult<Image>,
{
    let name = input
        .file_name()
        .with_context(|| format!("No file name: {}", input.display()))?;
    let output = config.output_dir.join(name);

    println!("Processing: {}", super::display_name(input));

    let image = super::load_image(input)?;
    debug!(w = image.width(), h = image.height(), comps = image.components(), "Decoded");

    let sharpened = filter(&image)
        .with_context(|| format!("Failed to sharpen: {}", input.display()))?;
    drop(image);

    super::save_image(&output, &sharpened, config.quality)?;
    Ok(output)
}
