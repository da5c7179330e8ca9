//! Image info command.

use crate::InfoArgs;
use anyhow::Result;
use bitblend_core::ColorModel;
use bitblend_io::Format;
use std::fs;

/// Prints dimensions, color model and sample depth of each input.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;
        let model = image.model();

        println!("{}", path.display());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Model:      {}", model);
        println!("  Channels:   {}", model.channels());
        println!("  Depth:      {} bits", model.depth().bits());
        println!("  Alpha:      {}", alpha_label(model));
        println!("  File size:  {}", super::format_size(file_size));

        if verbose > 0 {
            println!("  Format:     {}", format);
            println!("  Pixels:     {}", image.pixel_count());
        }
    }

    Ok(())
}

/// Describes how a model stores alpha.
pub fn alpha_label(model: ColorModel) -> &'static str {
    match (model.has_alpha(), model.is_premultiplied()) {
        (false, _) => "none",
        (true, true) => "premultiplied",
        (true, false) => "straight",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_label() {
        assert_eq!(alpha_label(ColorModel::Rgba16), "premultiplied");
        assert_eq!(alpha_label(ColorModel::Nrgba8), "straight");
        assert_eq!(alpha_label(ColorModel::Alpha8), "straight");
        assert_eq!(alpha_label(ColorModel::Gray16), "none");
        assert_eq!(alpha_label(ColorModel::Cmyk8), "none");
    }
}
