//! Color models and sample depths.
//!
//! This module provides the canonical descriptors for how a raster lays out
//! its channels in memory.
//!
//! # Types
//!
//! - [`SampleDepth`] - Storage precision of one channel (8 or 16 bit)
//! - [`ColorModel`] - Channel layout plus depth of a whole raster
//!
//! # Usage
//!
//! ```rust
//! use bitblend_core::format::{ColorModel, SampleDepth};
//!
//! let model = ColorModel::Gray16;
//! assert_eq!(model.channels(), 1);
//! assert_eq!(model.depth(), SampleDepth::U16);
//!
//! let parsed: ColorModel = "nrgba8".parse().unwrap();
//! assert_eq!(parsed, ColorModel::Nrgba8);
//! ```

use crate::Error;
use std::str::FromStr;

/// Storage precision of a single channel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleDepth {
    /// 8-bit unsigned integer [0, 255].
    #[default]
    U8,
    /// 16-bit unsigned integer [0, 65535].
    U16,
}

impl SampleDepth {
    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
        }
    }

    /// Bytes needed to store one sample.
    #[inline]
    pub const fn bytes_per_sample(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
        }
    }
}

impl std::fmt::Display for SampleDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Channel layout and bit depth of a raster.
///
/// The first nine variants have a dedicated output representation in the
/// output allocator. The remaining ones (`Rgb*`, `GrayAlpha*`) are produced
/// by decoders only; an allocator asked for one of them falls back to
/// [`ColorModel::Rgba16`].
///
/// `Rgba*` models carry associated (premultiplied) alpha and `Nrgba*`
/// models straight alpha. The tag is informational: samples are read and
/// written verbatim in both, no (un)premultiplication takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// 8-bit RGBA, associated alpha.
    Rgba8,
    /// 16-bit RGBA, associated alpha.
    Rgba16,
    /// 8-bit RGBA, straight alpha.
    Nrgba8,
    /// 16-bit RGBA, straight alpha.
    Nrgba16,
    /// 8-bit luminance.
    Gray8,
    /// 16-bit luminance.
    Gray16,
    /// 8-bit alpha mask.
    Alpha8,
    /// 16-bit alpha mask.
    Alpha16,
    /// 8-bit CMYK.
    Cmyk8,
    /// 8-bit RGB without alpha (decode only).
    Rgb8,
    /// 16-bit RGB without alpha (decode only).
    Rgb16,
    /// 8-bit luminance with alpha (decode only).
    GrayAlpha8,
    /// 16-bit luminance with alpha (decode only).
    GrayAlpha16,
}

impl ColorModel {
    /// Every model, in declaration order.
    pub const ALL: [ColorModel; 13] = [
        Self::Rgba8,
        Self::Rgba16,
        Self::Nrgba8,
        Self::Nrgba16,
        Self::Gray8,
        Self::Gray16,
        Self::Alpha8,
        Self::Alpha16,
        Self::Cmyk8,
        Self::Rgb8,
        Self::Rgb16,
        Self::GrayAlpha8,
        Self::GrayAlpha16,
    ];

    /// Number of interleaved channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 | Self::Alpha8 | Self::Alpha16 => 1,
            Self::GrayAlpha8 | Self::GrayAlpha16 => 2,
            Self::Rgb8 | Self::Rgb16 => 3,
            Self::Rgba8 | Self::Rgba16 | Self::Nrgba8 | Self::Nrgba16 | Self::Cmyk8 => 4,
        }
    }

    /// Storage depth of each channel.
    #[inline]
    pub const fn depth(&self) -> SampleDepth {
        match self {
            Self::Rgba8
            | Self::Nrgba8
            | Self::Gray8
            | Self::Alpha8
            | Self::Cmyk8
            | Self::Rgb8
            | Self::GrayAlpha8 => SampleDepth::U8,
            Self::Rgba16
            | Self::Nrgba16
            | Self::Gray16
            | Self::Alpha16
            | Self::Rgb16
            | Self::GrayAlpha16 => SampleDepth::U16,
        }
    }

    /// Whether the layout stores an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::Rgba8
                | Self::Rgba16
                | Self::Nrgba8
                | Self::Nrgba16
                | Self::Alpha8
                | Self::Alpha16
                | Self::GrayAlpha8
                | Self::GrayAlpha16
        )
    }

    /// Whether color channels are tagged as premultiplied by alpha.
    #[inline]
    pub const fn is_premultiplied(&self) -> bool {
        matches!(self, Self::Rgba8 | Self::Rgba16)
    }

    /// Bytes per pixel in tightly packed storage.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.depth().bytes_per_sample()
    }

    /// Canonical name, also accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgba8 => "rgba8",
            Self::Rgba16 => "rgba16",
            Self::Nrgba8 => "nrgba8",
            Self::Nrgba16 => "nrgba16",
            Self::Gray8 => "gray8",
            Self::Gray16 => "gray16",
            Self::Alpha8 => "alpha8",
            Self::Alpha16 => "alpha16",
            Self::Cmyk8 => "cmyk8",
            Self::Rgb8 => "rgb8",
            Self::Rgb16 => "rgb16",
            Self::GrayAlpha8 => "grayalpha8",
            Self::GrayAlpha16 => "grayalpha16",
        }
    }
}

impl std::fmt::Display for ColorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ColorModel {
    type Err = Error;

    /// Parses a model name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}
