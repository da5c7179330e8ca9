//! Row-parallel blend engine using Rayon.
//!
//! Each output row is an independent slice of the raster, so rows are
//! dispatched to the rayon pool without any locking. Results are identical
//! to [`crate::blend::blend`] for every in-bounds pixel.
//!
//! # Example
//!
//! ```rust
//! use bitblend_core::{ColorModel, Raster, Rgba};
//! use bitblend_ops::{parallel, Operator};
//!
//! let a = Raster::filled(ColorModel::Rgba8, 64, 64, Rgba::new(1, 2, 3, 255));
//! let b = Raster::filled(ColorModel::Rgba8, 64, 64, Rgba::new(4, 4, 4, 255));
//! let mut out = Raster::new(ColorModel::Rgba8, 64, 64);
//!
//! parallel::blend_par(&a, &b, &mut out, Operator::Or.transform());
//! assert_eq!(out.rgba8(10, 10), Rgba::new(5, 6, 7, 255));
//! ```

use crate::blend::blend_pixel;
use bitblend_core::{PixelRead, Raster};
use rayon::prelude::*;
use tracing::trace;

/// Parallel version of [`crate::blend::blend`] writing into a [`Raster`].
///
/// The processed area is the output raster's own dimensions; both inputs
/// must be at least that large.
pub fn blend_par<A, B, F>(a: &A, b: &B, out: &mut Raster, op: F)
where
    A: PixelRead + Sync + ?Sized,
    B: PixelRead + Sync + ?Sized,
    F: Fn(u32, u32) -> u8 + Sync,
{
    trace!(width = out.width(), height = out.height(), "parallel::blend_par");

    out.rows_mut().into_par_iter().for_each(|mut row| {
        let y = row.y();
        for x in (0..row.width()).rev() {
            let color = blend_pixel(a.sample(x, y), b.sample(x, y), &op);
            row.set(x, color);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::blend;
    use crate::Operator;
    use bitblend_core::{ColorModel, Rgba};

    fn noise(model: ColorModel, w: u32, h: u32, seed: u32) -> Raster {
        let mut img = Raster::new(model, w, h);
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        for y in 0..h {
            for x in 0..w {
                let mut next = || {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                };
                img.set(x, y, Rgba::new(next(), next(), next(), next()));
            }
        }
        img
    }

    #[test]
    fn test_matches_sequential() {
        let models = [
            ColorModel::Rgba8,
            ColorModel::Nrgba16,
            ColorModel::Gray8,
            ColorModel::Alpha16,
            ColorModel::Cmyk8,
        ];
        for model in models {
            let a = noise(model, 37, 23, 7);
            let b = noise(model, 37, 23, 11);
            for op in Operator::ALL {
                let mut seq = Raster::new(model, 37, 23);
                let mut par = Raster::new(model, 37, 23);
                blend(&a, &b, &mut seq, 37, 23, op.transform());
                blend_par(&a, &b, &mut par, op.transform());
                assert_eq!(seq, par, "{} / {}", model, op);
            }
        }
    }

    #[test]
    fn test_single_pixel() {
        let a = Raster::filled(ColorModel::Nrgba8, 1, 1, Rgba::new(255, 0, 0, 255));
        let b = Raster::filled(ColorModel::Nrgba8, 1, 1, Rgba::new(0, 255, 0, 255));
        let mut out = Raster::new(ColorModel::Nrgba8, 1, 1);
        blend_par(&a, &b, &mut out, Operator::And.transform());
        assert_eq!(out.rgba8(0, 0), Rgba::new(0, 0, 0, 255));
    }
}
