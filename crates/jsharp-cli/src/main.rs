//! jsharp - batch JPEG sharpener
//!
//! Run without arguments to sharpen every JPEG in `./data/raw` into
//! `./data/processed`.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jsharp_io::jpeg::DEFAULT_QUALITY;
use jsharp_ops::Method;
use jsharp_ops::filter::DEFAULT_AMOUNT;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

/// Default input directory for batch runs.
pub const DEFAULT_INPUT_DIR: &str = "./data/raw";
/// Default output directory for batch runs.
pub const DEFAULT_OUTPUT_DIR: &str = "./data/processed";

#[derive(Parser)]
#[command(name = "jsharp")]
#[command(author, version, about = "Batch JPEG sharpener")]
#[command(long_about = "
Sharpens JPEG images with a 3x3 Laplacian kernel or a 3x3 unsharp mask.

With no subcommand, every *.jpg / *.jpeg in ./data/raw is sharpened
(unsharp mask, amount 1.35, quality 95) into ./data/processed under the
same file name. Files that fail to decode or encode are reported and skipped.

Examples:
  jsharp                                   # Batch with defaults
  jsharp batch -m laplacian -q 90          # Batch with the Laplacian kernel
  jsharp batch -i shots -o shots_sharp -a 0.8
  jsharp sharpen photo.jpg -o photo_sharp.jpg
  jsharp clarity                           # Compare raw vs processed sharpness
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sharpen every JPEG in a directory (default command)
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// Sharpen a single JPEG
    #[command(visible_alias = "s")]
    Sharpen(SharpenArgs),

    /// Score sharpness (Tenengrad) of raw vs processed images
    Clarity(ClarityArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// 3x3 Laplacian sharpen kernel
    Laplacian,
    /// 3x3 box-blur unsharp mask
    Unsharp,
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Sharpening method
    #[arg(short, long, value_enum, default_value_t = MethodArg::Unsharp)]
    method: MethodArg,

    /// Unsharp mask strength (0 = no change, 1 = classic)
    #[arg(short, long, default_value_t = DEFAULT_AMOUNT, value_parser = parse_amount)]
    amount: f32,

    /// JPEG output quality (0-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,
}

impl FilterArgs {
    fn method(&self) -> Method {
        match self.method {
            MethodArg::Laplacian => Method::Laplacian,
            MethodArg::Unsharp => Method::UnsharpMask {
                amount: self.amount,
            },
        }
    }
}

#[derive(Args)]
struct BatchArgs {
    /// Input directory
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args)]
struct SharpenArgs {
    /// Input JPEG
    input: PathBuf,

    /// Output JPEG
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args)]
struct ClarityArgs {
    /// Directory of original images
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    raw_dir: PathBuf,

    /// Directory of sharpened images
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    processed_dir: PathBuf,

    /// CSV report path
    #[arg(long, default_value = "clarity_scores.csv")]
    csv: PathBuf,
}

fn parse_amount(s: &str) -> Result<f32, String> {
    let amount: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !amount.is_finite() {
        return Err("amount must be a finite number".into());
    }
    Ok(amount)
}

/// Installs the stderr subscriber and, optionally, a file layer.
///
/// `RUST_LOG` overrides the level chosen by `-v`. The returned guard must
/// live until exit so buffered file output is flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install logger")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        None => commands::batch::run(&commands::batch::BatchConfig::default()).map(|_| ()),
        Some(Commands::Batch(args)) => {
            commands::batch::run(&commands::batch::BatchConfig::from(args)).map(|_| ())
        }
        Some(Commands::Sharpen(args)) => commands::sharpen::run(args, cli.verbose),
        Some(Commands::Clarity(args)) => commands::clarity::run(args, cli.verbose),
    }
}
