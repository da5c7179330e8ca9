//! Blend command

use crate::BlendArgs;
use anyhow::Result;
use bitblend_ops::{blend::check_sizes, combine, resolve};
use tracing::info;

pub fn run(args: BlendArgs, verbose: u8) -> Result<()> {
    let a = super::load_image(&args.image_a)?;
    let b = super::load_image(&args.image_b)?;
    check_sizes(&a, &b)?;

    let op = resolve(&args.op)?;

    if verbose > 0 {
        println!(
            "Blending {} {} {} ({}x{}, {})",
            args.image_a.display(),
            op,
            args.image_b.display(),
            a.width(),
            a.height(),
            a.model()
        );
    }

    let result = combine(&a, &b, op, !args.sequential)?;
    info!(model = %result.model(), output = %args.output.display(), "blend finished");

    super::save_image(&args.output, &result, args.quality)?;

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }

    Ok(())
}
