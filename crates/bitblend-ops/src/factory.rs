//! Output raster allocation.
//!
//! [`allocate`] picks a raster representation matching the source color
//! model, so an 8-bit gray input produces an 8-bit gray output and a
//! 16-bit RGBA input a 16-bit RGBA output. Channel precision is never
//! silently downgraded.
//!
//! Models without a dedicated output representation (`Rgb*`, `GrayAlpha*`)
//! fall back to [`ColorModel::Rgba16`], which holds any of their channel
//! sets without loss.

use bitblend_core::{ColorModel, Raster};
use tracing::debug;

/// Representation used for models the allocator does not recognize.
pub const FALLBACK_MODEL: ColorModel = ColorModel::Rgba16;

/// Returns the model an output raster for `model` will use.
pub fn output_model(model: ColorModel) -> ColorModel {
    match model {
        ColorModel::Alpha16 => ColorModel::Alpha16,
        ColorModel::Alpha8 => ColorModel::Alpha8,
        ColorModel::Gray16 => ColorModel::Gray16,
        ColorModel::Gray8 => ColorModel::Gray8,
        ColorModel::Cmyk8 => ColorModel::Cmyk8,
        ColorModel::Nrgba16 => ColorModel::Nrgba16,
        ColorModel::Nrgba8 => ColorModel::Nrgba8,
        ColorModel::Rgba16 => ColorModel::Rgba16,
        ColorModel::Rgba8 => ColorModel::Rgba8,
        ColorModel::Rgb8 | ColorModel::Rgb16 | ColorModel::GrayAlpha8 | ColorModel::GrayAlpha16 => {
            FALLBACK_MODEL
        }
    }
}

/// Allocates a zero-initialized output raster for `model`.
///
/// `width` and `height` must be positive; a zero-area raster is returned
/// as is for zero dimensions.
///
/// # Example
///
/// ```rust
/// use bitblend_core::ColorModel;
/// use bitblend_ops::factory::allocate;
///
/// let out = allocate(ColorModel::Gray16, 640, 480);
/// assert_eq!(out.model(), ColorModel::Gray16);
///
/// let out = allocate(ColorModel::Rgb8, 640, 480);
/// assert_eq!(out.model(), ColorModel::Rgba16);
/// ```
pub fn allocate(model: ColorModel, width: u32, height: u32) -> Raster {
    let target = output_model(model);
    if target != model {
        debug!(source = %model, target = %target, "no dedicated output representation, falling back");
    }
    Raster::new(target, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitblend_core::{RasterData, Rgba, SampleDepth};

    #[test]
    fn test_known_models_pass_through() {
        let known = [
            ColorModel::Rgba8,
            ColorModel::Rgba16,
            ColorModel::Nrgba8,
            ColorModel::Nrgba16,
            ColorModel::Gray8,
            ColorModel::Gray16,
            ColorModel::Alpha8,
            ColorModel::Alpha16,
            ColorModel::Cmyk8,
        ];
        for model in known {
            let out = allocate(model, 3, 2);
            assert_eq!(out.model(), model);
            assert_eq!(out.dimensions(), (3, 2));
        }
    }

    #[test]
    fn test_gray16_layout() {
        let out = allocate(ColorModel::Gray16, 4, 4);
        assert_eq!(out.model().channels(), 1);
        assert_eq!(out.model().depth(), SampleDepth::U16);
        assert_eq!(out.data(), &RasterData::U16(vec![0; 16]));
    }

    #[test]
    fn test_fallback_is_lossless_16bit() {
        for model in [
            ColorModel::Rgb8,
            ColorModel::Rgb16,
            ColorModel::GrayAlpha8,
            ColorModel::GrayAlpha16,
        ] {
            let mut out = allocate(model, 2, 2);
            assert_eq!(out.model(), FALLBACK_MODEL);
            assert_eq!(out.sample(1, 1), Rgba::default());

            out.set(1, 1, Rgba::new(0x12, 0x34, 0x56, 0x78));
            assert_eq!(out.rgba8(1, 1), Rgba::new(0x12, 0x34, 0x56, 0x78));
        }

        let data: Vec<u16> = vec![0x0001, 0x7FFF, 0x8000, 0xFFFE];
        let raster = Raster::from_u16(FALLBACK_MODEL, 1, 1, data).unwrap();
        assert_eq!(raster.sample(0, 0), Rgba::new(0x0001, 0x7FFF, 0x8000, 0xFFFE));
    }
}
