//! # bitblend-io
//!
//! Reads and writes [`Raster`] images.
//!
//! | Format | Read | Write | Bit Depths | Notes |
//! |--------|------|-------|------------|-------|
//! | PNG | Yes | Yes | 8, 16 | Palette and sub-byte images expanded |
//! | JPEG | Yes | Yes | 8 (16-bit luma read) | Quality setting, CMYK |
//!
//! Input format is detected from magic bytes, falling back to the file
//! extension. Output format always follows the extension.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bitblend_io::{read, write_with_quality};
//!
//! let image = read("input.png")?;
//! write_with_quality("result.jpeg", &image, 95)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod detect;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use bitblend_core::Raster;
pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;
use tracing::debug;

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image, auto-detecting its format.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized files or formats
/// compiled out by features, and codec errors otherwise.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), %format, "reading image");

    #[allow(unreachable_patterns)]
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(unsupported(path)),
    }
}

/// Writes an image; the format follows the file extension.
///
/// JPEG output uses the maximum quality.
pub fn write<P: AsRef<Path>>(path: P, image: &Raster) -> IoResult<()> {
    write_impl(path.as_ref(), image, None)
}

/// Writes an image with an explicit JPEG quality (1-100).
///
/// Quality is ignored for lossless formats.
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &Raster, quality: u8) -> IoResult<()> {
    write_impl(path.as_ref(), image, Some(quality))
}

#[cfg_attr(not(feature = "jpeg"), allow(unused_variables))]
fn write_impl(path: &Path, image: &Raster, quality: Option<u8>) -> IoResult<()> {
    let format = Format::from_extension(path);
    debug!(path = %path.display(), %format, model = %image.model(), "writing image");

    #[allow(unreachable_patterns)]
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => match quality {
            Some(q) => jpeg::write_with_quality(path, image, q),
            None => jpeg::write(path, image),
        },

        _ => Err(unsupported(path)),
    }
}
