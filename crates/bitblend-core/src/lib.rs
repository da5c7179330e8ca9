//! # bitblend-core
//!
//! Core types for bitwise image blending.
//!
//! - [`ColorModel`], [`SampleDepth`] - How a raster stores its channels
//! - [`Rgba`] - Pixel value, 16-bit for samples and 8-bit for blend results
//! - [`Raster`] - Owned raster buffer tagged with its color model
//! - [`PixelRead`], [`PixelWrite`] - Access traits used by the blend engine
//!
//! ## Crate Structure
//!
//! ```text
//! bitblend-core (this crate)
//!    ^
//!    +-- bitblend-ops (operators, allocation, blend engine)
//!    +-- bitblend-io  (PNG / JPEG codecs)
//!    +-- bitblend-cli (command line front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod pixel;
pub mod raster;

pub use error::{Error, Result};
pub use format::{ColorModel, SampleDepth};
pub use pixel::Rgba;
pub use raster::{PixelRead, PixelWrite, Raster, RasterData, RowMut};

/// Prelude module for convenient imports.
///
/// ```
/// use bitblend_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::{ColorModel, SampleDepth};
    pub use crate::pixel::Rgba;
    pub use crate::raster::{PixelRead, PixelWrite, Raster, RasterData, RowMut};
}
