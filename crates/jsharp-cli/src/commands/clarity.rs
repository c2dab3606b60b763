//! Clarity command - Tenengrad sharpness of raw vs processed images

use crate::ClarityArgs;
use anyhow::{Context, Result};
use jsharp_ops::sharpness::tenengrad;
use std::fmt::Write as _;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

const CSV_HEADER: &str = "Directory 1 Scores,Directory 2 Scores";

pub fn run(args: ClarityArgs, verbose: u8) -> Result<()> {
    trace!(raw = %args.raw_dir.display(), processed = %args.processed_dir.display(), "clarity::run");

    let raw = score_dir(&args.raw_dir)?;
    let processed = score_dir(&args.processed_dir)?;

    jsharp_io::fs::write_atomic(&args.csv, csv_rows(&raw, &processed).as_bytes())
        .with_context(|| format!("Failed to write report: {}", args.csv.display()))?;
    println!("Scores saved to: {}", args.csv.display());

    println!("Raw average: {:.2}", mean(&raw));
    println!("Processed average: {:.2}", mean(&processed));

    if verbose > 0 {
        println!("Scored {} raw, {} processed", raw.len(), processed.len());
    }

    Ok(())
}

/// Scores every JPEG in `dir`; unreadable files are reported and skipped.
fn score_dir(dir: &Path) -> Result<Vec<f64>> {
    println!("Scoring: {}", dir.display());

    let files = jsharp_io::fs::find_jpegs(dir)
        .with_context(|| format!("Failed to scan: {}", dir.display()))?;

    let mut scores = Vec::with_capacity(files.len());
    for path in &files {
        match super::load_image(path) {
            Ok(image) => {
                let score = tenengrad(&image);
                debug!(file = %path.display(), score, "Scored");
                println!("  {}: {:.2}", super::display_name(path), score);
                scores.push(score);
            }
            Err(e) => {
                warn!(file = %path.display(), "Skipped unreadable image");
                eprintln!("Error: {:#}", e);
            }
        }
    }
    Ok(scores)
}

/// Two-column CSV; the shorter column is padded with empty cells.
///
/// Cells use `{:?}` so whole scores keep their fraction (`1234.0`).
fn csv_rows(first: &[f64], second: &[f64]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    let cell = |scores: &[f64], i: usize| {
        scores.get(i).map(|s| format!("{s:?}")).unwrap_or_default()
    };
    for i in 0..first.len().max(second.len()) {
        let _ = writeln!(out, "{},{}", cell(first, i), cell(second, i));
    }
    out
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
