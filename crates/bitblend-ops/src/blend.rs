//! The blend engine.
//!
//! [`blend`] walks every pixel of two inputs, reads both as normalized
//! 16-bit samples, applies a per-channel transform to R, G, B and A
//! independently and writes the resulting 8-bit straight-alpha color into
//! the output raster, which converts it through its own color model.
//!
//! # Traversal
//!
//! Rows are visited from `height` down to `0` and columns from `width` down
//! to `0`, both inclusive. The extra row and column fall outside the
//! rasters: reads there return the zero sample and writes are dropped, so
//! every in-bounds pixel is written exactly once. The row-parallel variant
//! in [`crate::parallel`] skips the overshoot and produces identical output.
//!
//! # Example
//!
//! ```rust
//! use bitblend_core::{ColorModel, Raster, Rgba};
//! use bitblend_ops::blend::blend;
//! use bitblend_ops::Operator;
//!
//! let a = Raster::filled(ColorModel::Nrgba8, 2, 2, Rgba::new(255, 0, 0, 255));
//! let b = Raster::filled(ColorModel::Nrgba8, 2, 2, Rgba::new(0, 255, 0, 255));
//! let mut out = Raster::new(ColorModel::Nrgba8, 2, 2);
//!
//! blend(&a, &b, &mut out, 2, 2, Operator::Xor.transform());
//! assert_eq!(out.rgba8(0, 0), Rgba::new(255, 255, 0, 0));
//! ```

use crate::factory::allocate;
use crate::operator::Operator;
use crate::{OpsError, OpsResult};
use bitblend_core::{PixelRead, PixelWrite, Raster, Rgba};
use tracing::{debug, trace};

/// Combines two samples channel by channel.
#[inline]
pub fn blend_pixel<F>(a: Rgba<u16>, b: Rgba<u16>, op: &F) -> Rgba<u8>
where
    F: Fn(u32, u32) -> u8 + ?Sized,
{
    Rgba::new(
        op(a.r as u32, b.r as u32),
        op(a.g as u32, b.g as u32),
        op(a.b as u32, b.b as u32),
        op(a.a as u32, b.a as u32),
    )
}

/// Fills `out` by combining `a` and `b` pixel by pixel.
///
/// # Arguments
///
/// * `a` - First input, never mutated
/// * `b` - Second input, never mutated
/// * `out` - Output raster, written in place
/// * `width` - Number of columns to process
/// * `height` - Number of rows to process
/// * `op` - Pure per-channel transform
///
/// The inputs must cover `[0, width) x [0, height)`; equal input sizes are
/// the caller's responsibility and are not re-checked here.
pub fn blend<A, B, O, F>(a: &A, b: &B, out: &mut O, width: u32, height: u32, op: F)
where
    A: PixelRead + ?Sized,
    B: PixelRead + ?Sized,
    O: PixelWrite + ?Sized,
    F: Fn(u32, u32) -> u8,
{
    trace!(width, height, "blend::blend");

    for y in (0..=height).rev() {
        for x in (0..=width).rev() {
            let color = blend_pixel(a.sample(x, y), b.sample(x, y), &op);
            out.set(x, y, color);
        }
    }
}

/// Verifies that two rasters have identical dimensions.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] when they differ.
pub fn check_sizes<A, B>(a: &A, b: &B) -> OpsResult<()>
where
    A: PixelRead + ?Sized,
    B: PixelRead + ?Sized,
{
    let (da, db) = (a.dimensions(), b.dimensions());
    if da != db {
        return Err(OpsError::size_mismatch(da, db));
    }
    Ok(())
}

/// Combines two rasters into a newly allocated output.
///
/// Checks that the inputs have equal size, allocates the output from the
/// color model of `a` and runs the engine. With `parallel` set (and the
/// `parallel` feature enabled) rows are processed on the rayon pool.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if the inputs differ in size.
///
/// # Example
///
/// ```rust
/// use bitblend_core::{ColorModel, Raster, Rgba};
/// use bitblend_ops::{combine, Operator};
///
/// let a = Raster::filled(ColorModel::Gray8, 4, 4, Rgba::new(200, 200, 200, 255));
/// let out = combine(&a, &a, Operator::Xor, false).unwrap();
/// assert_eq!(out.model(), ColorModel::Gray8);
/// assert_eq!(out.rgba8(3, 3).r, 0);
/// ```
pub fn combine<A, B>(a: &A, b: &B, op: Operator, parallel: bool) -> OpsResult<Raster>
where
    A: PixelRead + Sync + ?Sized,
    B: PixelRead + Sync + ?Sized,
{
    check_sizes(a, b)?;

    let (width, height) = a.dimensions();
    let mut out = allocate(a.color_model(), width, height);
    debug!(
        width,
        height,
        op = %op,
        input = %a.color_model(),
        output = %out.model(),
        parallel,
        "combining images"
    );

    #[cfg(feature = "parallel")]
    if parallel {
        crate::parallel::blend_par(a, b, &mut out, op.transform());
        return Ok(out);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    blend(a, b, &mut out, width, height, op.transform());
    Ok(out)
}
