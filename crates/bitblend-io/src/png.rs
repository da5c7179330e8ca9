//! PNG format support.
//!
//! Reading expands palette and sub-byte images, so every decoded raster is
//! 8 or 16 bits per sample. Truecolor with alpha decodes to the
//! non-premultiplied models since PNG alpha is straight.
//!
//! | PNG color type   | 8-bit        | 16-bit        |
//! |------------------|--------------|---------------|
//! | Grayscale        | `Gray8`      | `Gray16`      |
//! | Grayscale+Alpha  | `GrayAlpha8` | `GrayAlpha16` |
//! | RGB              | `Rgb8`       | `Rgb16`       |
//! | RGBA             | `Nrgba8`     | `Nrgba16`     |
//!
//! Writing keeps the raster's sample depth. Alpha-only rasters are stored
//! as straight-alpha white (gray 0xFF plus alpha); CMYK is converted to
//! 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use bitblend_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use bitblend_core::{ColorModel, Raster, RasterData};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG stream into a raster.
pub fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let model = match (info.color_type, info.bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => ColorModel::Gray8,
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => ColorModel::Gray16,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => ColorModel::GrayAlpha8,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => ColorModel::GrayAlpha16,
        (png::ColorType::Rgb, png::BitDepth::Eight) => ColorModel::Rgb8,
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => ColorModel::Rgb16,
        (png::ColorType::Rgba, png::BitDepth::Eight) => ColorModel::Nrgba8,
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => ColorModel::Nrgba16,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    debug!(width = info.width, height = info.height, %model, "decoded PNG");

    let data = match info.bit_depth {
        png::BitDepth::Sixteen => RasterData::U16(bytes_to_u16(&buf)),
        _ => RasterData::U8(buf),
    };
    Ok(Raster::from_data(model, info.width, info.height, data)?)
}

/// Writes a raster to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &Raster) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(image, BufWriter::new(file))
}

/// Encodes a raster as PNG into `writer`.
pub fn encode<W: Write>(image: &Raster, writer: W) -> IoResult<()> {
    let (color_type, bit_depth) = layout(image.model());

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&image_bytes(image))
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(width = image.width(), height = image.height(), model = %image.model(), "encoded PNG");
    Ok(())
}

/// PNG color type and depth used to store `model`.
fn layout(model: ColorModel) -> (png::ColorType, png::BitDepth) {
    use png::{BitDepth, ColorType};

    let depth = match model.depth() {
        bitblend_core::SampleDepth::U8 => BitDepth::Eight,
        bitblend_core::SampleDepth::U16 => BitDepth::Sixteen,
    };
    match model {
        ColorModel::Rgba8 | ColorModel::Rgba16 | ColorModel::Nrgba8 | ColorModel::Nrgba16 => {
            (ColorType::Rgba, depth)
        }
        ColorModel::Rgb8 | ColorModel::Rgb16 => (ColorType::Rgb, depth),
        ColorModel::Gray8 | ColorModel::Gray16 => (ColorType::Grayscale, depth),
        ColorModel::GrayAlpha8
        | ColorModel::GrayAlpha16
        | ColorModel::Alpha8
        | ColorModel::Alpha16 => (ColorType::GrayscaleAlpha, depth),
        ColorModel::Cmyk8 => (ColorType::Rgb, BitDepth::Eight),
    }
}

/// Serializes raster samples in the layout chosen by [`layout`].
fn image_bytes(image: &Raster) -> Vec<u8> {
    match (image.model(), image.data()) {
        (ColorModel::Alpha8, RasterData::U8(v)) => v.iter().flat_map(|&a| [0xFF, a]).collect(),
        (ColorModel::Alpha16, RasterData::U16(v)) => v
            .iter()
            .flat_map(|&a| {
                let [hi, lo] = a.to_be_bytes();
                [0xFF, 0xFF, hi, lo]
            })
            .collect(),
        (ColorModel::Cmyk8, _) => {
            let mut out = Vec::with_capacity(image.pixel_count() * 3);
            for y in 0..image.height() {
                for x in 0..image.width() {
                    let px = image.rgba8(x, y);
                    out.extend_from_slice(&[px.r, px.g, px.b]);
                }
            }
            out
        }
        (_, RasterData::U8(v)) => v.clone(),
        (_, RasterData::U16(v)) => v.iter().flat_map(|s| s.to_be_bytes()).collect(),
    }
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitblend_core::Rgba;
    use std::io::Cursor;

    fn roundtrip(image: &Raster) -> Raster {
        let mut bytes = Vec::new();
        encode(image, &mut bytes).expect("Failed to encode PNG");
        decode(Cursor::new(bytes)).expect("Failed to decode PNG")
    }

    fn ramp(model: ColorModel, w: u32, h: u32) -> Raster {
        let mut img = Raster::new(model, w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, Rgba::new((x * 8) as u8, (y * 8) as u8, 128, (x + y) as u8));
            }
        }
        img
    }

    #[test]
    fn test_roundtrip_native_models() {
        for model in [
            ColorModel::Gray8,
            ColorModel::Gray16,
            ColorModel::GrayAlpha8,
            ColorModel::GrayAlpha16,
            ColorModel::Rgb8,
            ColorModel::Rgb16,
            ColorModel::Nrgba8,
            ColorModel::Nrgba16,
        ] {
            let image = ramp(model, 32, 16);
            let loaded = roundtrip(&image);
            assert_eq!(loaded, image, "{}", model);
        }
    }

    #[test]
    fn test_rgba_reads_back_as_nrgba() {
        let image = ramp(ColorModel::Rgba16, 8, 8);
        let loaded = roundtrip(&image);
        assert_eq!(loaded.model(), ColorModel::Nrgba16);
        assert_eq!(loaded.data(), image.data());
    }

    #[test]
    fn test_alpha_is_stored_as_gray_alpha() {
        let image = ramp(ColorModel::Alpha8, 4, 4);
        let loaded = roundtrip(&image);
        assert_eq!(loaded.model(), ColorModel::GrayAlpha8);
        // Straight alpha on white: the mask's coverage moves to the alpha
        // channel only.
        for y in 0..4 {
            for x in 0..4 {
                let a = image.rgba8(x, y).a;
                assert_eq!(loaded.rgba8(x, y), Rgba::new(255, 255, 255, a));
            }
        }
    }

    #[test]
    fn test_cmyk_is_stored_as_rgb() {
        let image = ramp(ColorModel::Cmyk8, 4, 4);
        let loaded = roundtrip(&image);
        assert_eq!(loaded.model(), ColorModel::Rgb8);
        assert_eq!(loaded.rgba8(3, 2), image.rgba8(3, 2));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let image = ramp(ColorModel::Gray16, 16, 16);

        write(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = decode(Cursor::new(b"not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
