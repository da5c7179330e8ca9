//! Error types for bitblend-core operations.
//!
//! The [`Error`] enum covers the failure modes of building a [`Raster`]
//! from caller-supplied data and of parsing [`ColorModel`] names.
//! Reading and writing pixels never fails: out-of-range coordinates are
//! answered with a zero sample or ignored.
//!
//! # Usage
//!
//! ```rust
//! use bitblend_core::{ColorModel, Error, Raster};
//!
//! let err = Raster::from_u8(ColorModel::Gray8, 4, 4, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! [`Raster`]: crate::Raster
//! [`ColorModel`]: crate::ColorModel

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing rasters or parsing tags.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match the requested dimensions.
    ///
    /// Returned by [`Raster::from_u8`](crate::Raster::from_u8) and
    /// [`Raster::from_u16`](crate::Raster::from_u16) when the sample count is
    /// not `width * height * channels`, or when the size overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample storage does not match the bit depth of the color model.
    ///
    /// For example, handing 8-bit samples to a `Gray16` raster.
    #[error("color model {model} stores {expected} samples, got {got}")]
    DepthMismatch {
        /// Model name
        model: &'static str,
        /// Depth the model requires
        expected: &'static str,
        /// Depth that was supplied
        got: &'static str,
    },

    /// A color model name could not be parsed.
    #[error("unknown color model: {0}")]
    UnknownModel(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DepthMismatch`] error.
    #[inline]
    pub fn depth_mismatch(model: &'static str, expected: &'static str, got: &'static str) -> Self {
        Self::DepthMismatch {
            model,
            expected,
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(100, 50, "expected 5000 samples, got 12");
        let msg = err.to_string();
        assert!(msg.contains("100x50"));
        assert!(msg.contains("got 12"));
    }

    #[test]
    fn test_depth_mismatch() {
        let err = Error::depth_mismatch("Gray16", "u16", "u8");
        assert_eq!(err.to_string(), "color model Gray16 stores u16 samples, got u8");
    }
}
