//! Pixel values and per-model pixel codecs.
//!
//! - [`Rgba`] - Four-channel pixel value, generic over the sample type
//! - [`Sample`] - Storage trait implemented by `u8` and `u16`
//! - [`decode`] / [`encode`] - Convert between a raster's interleaved
//!   channels and normalized RGBA
//!
//! Every raster is read as `Rgba<u16>`: 8-bit samples are widened with
//! `v * 257`, so that `0xFF` becomes `0xFFFF` and the low byte of a widened
//! sample equals the original byte. Blended colors are written as
//! `Rgba<u8>` and each model stores them through its own conversion.
//!
//! # Example
//!
//! ```rust
//! use bitblend_core::{ColorModel, Rgba};
//! use bitblend_core::pixel::{decode, encode};
//!
//! let mut px = [0u8; 1];
//! encode(ColorModel::Gray8, Rgba::new(255, 255, 255, 255), &mut px);
//! assert_eq!(px, [255]);
//! assert_eq!(decode(ColorModel::Gray8, &px), Rgba::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF));
//! ```

use crate::{ColorModel, SampleDepth};

/// Fully opaque 16-bit alpha.
pub const OPAQUE: u16 = 0xFFFF;

/// RGBA pixel value.
///
/// `Rgba<u16>` is the normalized sample read from any raster,
/// `Rgba<u8>` the straight-alpha color written by blend operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba<T> {
    /// Red channel.
    pub r: T,
    /// Green channel.
    pub g: T,
    /// Blue channel.
    pub b: T,
    /// Alpha channel.
    pub a: T,
}

impl<T: Copy> Rgba<T> {
    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the channels in R, G, B, A order.
    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a pixel from channels in R, G, B, A order.
    #[inline]
    pub fn from_array([r, g, b, a]: [T; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Applies `f` to every channel.
    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Rgba<U> {
        Rgba {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: f(self.a),
        }
    }
}

impl Rgba<u8> {
    /// Widens every channel to 16 bits (`v * 257`).
    #[inline]
    pub fn widen(self) -> Rgba<u16> {
        self.map(widen)
    }
}

impl Rgba<u16> {
    /// Keeps the high byte of every channel.
    #[inline]
    pub fn narrow(self) -> Rgba<u8> {
        self.map(|v| (v >> 8) as u8)
    }
}

/// Widens an 8-bit sample to 16 bits, mapping 255 to 65535.
#[inline]
pub const fn widen(v: u8) -> u16 {
    v as u16 * 257
}

/// Storage type of one channel sample.
pub trait Sample: Copy + Default + Send + Sync + 'static {
    /// Depth tag for this storage type.
    const DEPTH: SampleDepth;

    /// Converts to a 16-bit normalized sample.
    fn widen(self) -> u16;

    /// Converts an 8-bit channel value into this storage.
    fn from_u8(v: u8) -> Self;

    /// Converts a 16-bit normalized value into this storage.
    fn from_u16(v: u16) -> Self;
}

impl Sample for u8 {
    const DEPTH: SampleDepth = SampleDepth::U8;

    #[inline]
    fn widen(self) -> u16 {
        widen(self)
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        v
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        (v >> 8) as u8
    }
}

impl Sample for u16 {
    const DEPTH: SampleDepth = SampleDepth::U16;

    #[inline]
    fn widen(self) -> u16 {
        self
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        widen(v)
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        v
    }
}

/// ITU-R BT.601 luma of 16-bit RGB, rounded.
///
/// The weights sum to 65536 so the full computation fits in `u32`.
#[inline]
pub fn luma(r: u16, g: u16, b: u16) -> u16 {
    let y = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + (1 << 15);
    (y >> 16) as u16
}

/// Converts 16-bit CMYK samples to 16-bit RGB.
#[inline]
pub fn cmyk_to_rgb(c: u16, m: u16, y: u16, k: u16) -> [u16; 3] {
    let w = 0xFFFF - k as u32;
    let channel = |v: u16| ((0xFFFF - v as u32) * w / 0xFFFF) as u16;
    [channel(c), channel(m), channel(y)]
}

/// Converts 8-bit RGB to 8-bit CMYK.
///
/// Pure black maps to `(0, 0, 0, 255)`.
#[inline]
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> [u8; 4] {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    let w = r.max(g).max(b);
    if w == 0 {
        return [0, 0, 0, 0xFF];
    }
    let channel = |v: u32| ((w - v) * 0xFF / w) as u8;
    [channel(r), channel(g), channel(b), (0xFF - w) as u8]
}

/// Reads one pixel's interleaved channels as a normalized 16-bit sample.
///
/// `px` must hold at least `model.channels()` samples.
#[inline]
pub fn decode<T: Sample>(model: ColorModel, px: &[T]) -> Rgba<u16> {
    let w = |i: usize| px[i].widen();
    match model {
        ColorModel::Rgba8 | ColorModel::Rgba16 | ColorModel::Nrgba8 | ColorModel::Nrgba16 => {
            Rgba::new(w(0), w(1), w(2), w(3))
        }
        ColorModel::Rgb8 | ColorModel::Rgb16 => Rgba::new(w(0), w(1), w(2), OPAQUE),
        ColorModel::Gray8 | ColorModel::Gray16 => {
            let y = w(0);
            Rgba::new(y, y, y, OPAQUE)
        }
        ColorModel::GrayAlpha8 | ColorModel::GrayAlpha16 => {
            let y = w(0);
            Rgba::new(y, y, y, w(1))
        }
        // Premultiplied white: every channel carries the coverage.
        ColorModel::Alpha8 | ColorModel::Alpha16 => {
            let a = w(0);
            Rgba::new(a, a, a, a)
        }
        ColorModel::Cmyk8 => {
            let [r, g, b] = cmyk_to_rgb(w(0), w(1), w(2), w(3));
            Rgba::new(r, g, b, OPAQUE)
        }
    }
}

/// Stores an 8-bit color into one pixel's interleaved channels.
///
/// `px` must hold at least `model.channels()` samples.
#[inline]
pub fn encode<T: Sample>(model: ColorModel, color: Rgba<u8>, px: &mut [T]) {
    match model {
        ColorModel::Rgba8 | ColorModel::Rgba16 | ColorModel::Nrgba8 | ColorModel::Nrgba16 => {
            px[0] = T::from_u8(color.r);
            px[1] = T::from_u8(color.g);
            px[2] = T::from_u8(color.b);
            px[3] = T::from_u8(color.a);
        }
        ColorModel::Rgb8 | ColorModel::Rgb16 => {
            px[0] = T::from_u8(color.r);
            px[1] = T::from_u8(color.g);
            px[2] = T::from_u8(color.b);
        }
        ColorModel::Gray8 | ColorModel::Gray16 => {
            px[0] = T::from_u16(luma(widen(color.r), widen(color.g), widen(color.b)));
        }
        ColorModel::GrayAlpha8 | ColorModel::GrayAlpha16 => {
            px[0] = T::from_u16(luma(widen(color.r), widen(color.g), widen(color.b)));
            px[1] = T::from_u8(color.a);
        }
        ColorModel::Alpha8 | ColorModel::Alpha16 => {
            px[0] = T::from_u8(color.a);
        }
        ColorModel::Cmyk8 => {
            let cmyk = rgb_to_cmyk(color.r, color.g, color.b);
            for (dst, v) in px.iter_mut().zip(cmyk) {
                *dst = T::from_u8(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_narrow() {
        assert_eq!(widen(0), 0);
        assert_eq!(widen(1), 0x0101);
        assert_eq!(widen(255), 0xFFFF);
        let c = Rgba::new(1u8, 128, 254, 255);
        assert_eq!(c.widen().narrow(), c);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(0xFFFF, 0xFFFF, 0xFFFF), 0xFFFF);
        // Green dominates
        assert!(luma(0, 0xFFFF, 0) > luma(0xFFFF, 0, 0));
        assert!(luma(0xFFFF, 0, 0) > luma(0, 0, 0xFFFF));
    }

    #[test]
    fn test_cmyk_roundtrip_primaries() {
        assert_eq!(rgb_to_cmyk(255, 0, 0), [0, 255, 255, 0]);
        assert_eq!(rgb_to_cmyk(0, 0, 0), [0, 0, 0, 255]);
        assert_eq!(rgb_to_cmyk(255, 255, 255), [0, 0, 0, 0]);
        assert_eq!(cmyk_to_rgb(0, widen(255), widen(255), 0), [0xFFFF, 0, 0]);
        assert_eq!(cmyk_to_rgb(0, 0, 0, widen(255)), [0, 0, 0]);
    }

    #[test]
    fn test_decode_layouts() {
        assert_eq!(
            decode(ColorModel::Nrgba8, &[255u8, 0, 1, 128]),
            Rgba::new(0xFFFF, 0, 0x0101, 0x8080)
        );
        assert_eq!(
            decode(ColorModel::Rgb16, &[1u16, 2, 3]),
            Rgba::new(1, 2, 3, OPAQUE)
        );
        assert_eq!(
            decode(ColorModel::GrayAlpha8, &[10u8, 20]),
            Rgba::new(widen(10), widen(10), widen(10), widen(20))
        );
        assert_eq!(
            decode(ColorModel::Alpha16, &[0x1234u16]),
            Rgba::new(0x1234, 0x1234, 0x1234, 0x1234)
        );
        assert_eq!(
            decode(ColorModel::Alpha8, &[0x80u8]),
            Rgba::new(0x8080, 0x8080, 0x8080, 0x8080)
        );
    }

    #[test]
    fn test_encode_layouts() {
        let color = Rgba::new(255u8, 0, 0, 7);

        let mut rgba16 = [0u16; 4];
        encode(ColorModel::Rgba16, color, &mut rgba16);
        assert_eq!(rgba16, [0xFFFF, 0, 0, widen(7)]);

        let mut alpha = [0u8; 1];
        encode(ColorModel::Alpha8, color, &mut alpha);
        assert_eq!(alpha, [7]);

        let mut cmyk = [0u8; 4];
        encode(ColorModel::Cmyk8, color, &mut cmyk);
        assert_eq!(cmyk, [0, 255, 255, 0]);

        let mut gray = [0u16; 1];
        encode(ColorModel::Gray16, Rgba::new(255, 255, 255, 0), &mut gray);
        assert_eq!(gray, [0xFFFF]);
    }
}
