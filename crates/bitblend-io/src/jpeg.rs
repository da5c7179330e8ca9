//! JPEG format support.
//!
//! Decoding keeps the stream's native layout: RGB, 8 or 16-bit luma, or
//! CMYK. Encoding writes luma for 8-bit gray, CMYK for CMYK rasters and
//! 8-bit RGB for everything else, dropping alpha and the low byte of 16-bit
//! samples.
//!
//! # Example
//!
//! ```rust,ignore
//! use bitblend_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write_with_quality("preview.jpg", &image, 80)?;
//! ```

use crate::{IoError, IoResult};
use bitblend_core::{ColorModel, Raster, RasterData};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Quality used by [`write`]: the highest the encoder supports.
pub const DEFAULT_QUALITY: u8 = 100;

/// Options for writing JPEG files.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Decodes a JPEG stream into a raster.
pub fn decode<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (model, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (ColorModel::Rgb8, RasterData::U8(pixels)),
        jpeg_decoder::PixelFormat::L8 => (ColorModel::Gray8, RasterData::U8(pixels)),
        jpeg_decoder::PixelFormat::L16 => (ColorModel::Gray16, RasterData::U16(luma16(&pixels))),
        jpeg_decoder::PixelFormat::CMYK32 => (ColorModel::Cmyk8, RasterData::U8(pixels)),
    };

    debug!(width, height, %model, "decoded JPEG");
    Ok(Raster::from_data(model, width, height, data)?)
}

/// Reassembles 16-bit luma samples, which the decoder emits in native
/// byte order.
fn luma16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|l16| u16::from_ne_bytes([l16[0], l16[1]]))
        .collect()
}

/// Writes a JPEG file at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &Raster) -> IoResult<()> {
    write_with_options(path, image, &JpegWriterOptions::default())
}

/// Writes a JPEG file at the given quality (clamped to 1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &Raster, quality: u8) -> IoResult<()> {
    write_with_options(path, image, &JpegWriterOptions { quality })
}

/// Writes a JPEG file with custom options.
pub fn write_with_options<P: AsRef<Path>>(
    path: P,
    image: &Raster,
    options: &JpegWriterOptions,
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(image, &mut writer, options)?;
    writer.flush()?;
    Ok(())
}

/// Encodes a raster as JPEG into `writer`.
pub fn encode<W: Write>(image: &Raster, writer: W, options: &JpegWriterOptions) -> IoResult<()> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "image too large for JPEG: {}x{}",
                image.width(),
                image.height()
            )));
        }
    };

    let (color_type, pixel_data) = match (image.model(), image.data()) {
        (ColorModel::Gray8, RasterData::U8(v)) => (ColorType::Luma, v.clone()),
        (ColorModel::Cmyk8, RasterData::U8(v)) => (ColorType::Cmyk, v.clone()),
        _ => (ColorType::Rgb, rgb_bytes(image)),
    };

    let quality = options.quality.clamp(1, 100);
    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(&pixel_data, width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    debug!(width, height, model = %image.model(), quality, "encoded JPEG");
    Ok(())
}

/// High byte of each color channel, alpha dropped.
fn rgb_bytes(image: &Raster) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.pixel_count() * 3);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = image.rgba8(x, y);
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitblend_core::Rgba;
    use std::io::Cursor;

    fn to_memory(image: &Raster, quality: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode(image, &mut bytes, &JpegWriterOptions { quality }).expect("Write failed");
        bytes
    }

    /// Tests basic roundtrip.
    #[test]
    fn test_roundtrip() {
        let mut image = Raster::new(ColorModel::Rgb8, 32, 32);
        for y in 0..32 {
            for x in 0..32 {
                image.set(x, y, Rgba::new((x * 8) as u8, (y * 8) as u8, 128, 255));
            }
        }

        let loaded = decode(Cursor::new(to_memory(&image, 100))).expect("Read failed");
        assert_eq!(loaded.dimensions(), (32, 32));
        assert_eq!(loaded.model(), ColorModel::Rgb8);
    }

    /// Flat color survives maximum quality almost exactly.
    #[test]
    fn test_flat_color_quality() {
        let image = Raster::filled(ColorModel::Nrgba8, 16, 16, Rgba::new(200, 100, 50, 7));
        let loaded = decode(Cursor::new(to_memory(&image, 100))).expect("Read failed");
        let px = loaded.rgba8(8, 8);
        assert!((px.r as i32 - 200).abs() <= 3);
        assert!((px.g as i32 - 100).abs() <= 3);
        assert!((px.b as i32 - 50).abs() <= 3);
        assert_eq!(px.a, 255);
    }

    /// Tests quality options.
    #[test]
    fn test_quality_options() {
        let mut image = Raster::new(ColorModel::Rgb8, 32, 32);
        for y in 0..32 {
            for x in 0..32 {
                image.set(x, y, Rgba::new((x * y) as u8, (x ^ y) as u8, (x * 7) as u8, 255));
            }
        }
        let low = to_memory(&image, 20).len();
        let high = to_memory(&image, 100).len();
        assert!(high >= low);
    }

    #[test]
    fn test_gray_stays_gray() {
        let image = Raster::filled(ColorModel::Gray8, 16, 16, Rgba::new(90, 90, 90, 255));
        let loaded = decode(Cursor::new(to_memory(&image, 100))).expect("Read failed");
        assert_eq!(loaded.model(), ColorModel::Gray8);
    }

    #[test]
    fn test_cmyk_stays_cmyk() {
        let image = Raster::filled(ColorModel::Cmyk8, 8, 8, Rgba::new(10, 20, 30, 255));
        let loaded = decode(Cursor::new(to_memory(&image, 100))).expect("Read failed");
        assert_eq!(loaded.model(), ColorModel::Cmyk8);
        assert_eq!(loaded.dimensions(), (8, 8));
    }

    #[test]
    fn test_luma16_native_order() {
        let samples = [0xAB12u16, 0x00FF, 0xFF00];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        let decoded = luma16(&bytes);
        assert_eq!(decoded, samples);

        // The low byte is the one a blend keeps.
        let image = Raster::from_u16(ColorModel::Gray16, 3, 1, decoded).unwrap();
        assert_eq!(image.sample(0, 0).r as u8, 0x12);
    }

    #[test]
    fn test_too_large() {
        let image = Raster::new(ColorModel::Gray8, 70_000, 1);
        let err = encode(&image, Vec::new(), &JpegWriterOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpeg");
        let image = Raster::filled(ColorModel::Rgba16, 8, 4, Rgba::new(0, 255, 0, 255));

        write_with_quality(&path, &image, 90).expect("Write failed");
        let loaded = read(&path).expect("Read failed");
        assert_eq!(loaded.dimensions(), (8, 4));
    }
}
