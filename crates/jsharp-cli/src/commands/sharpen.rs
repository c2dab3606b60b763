//! Sharpen command

use crate::SharpenArgs;
use anyhow::{Context, Result};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: SharpenArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "sharpen::run");

    let image = super::load_image(&args.input)?;
    let method = args.filter.method();

    info!(%method, w = image.width(), h = image.height(), "Applying sharpen");
    if verbose > 0 {
        println!("Sharpening {} ({})", args.input.display(), method);
    }

    let sharpened = method
        .apply(&image)
        .with_context(|| format!("Failed to sharpen: {}", args.input.display()))?;
    drop(image);

    super::save_image(&args.output, &sharpened, args.filter.quality)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
