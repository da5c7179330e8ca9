//! Raster buffers and the pixel access seams.
//!
//! - [`Raster`] - Owned, tightly packed raster tagged with a [`ColorModel`]
//! - [`RasterData`] - Sample storage (8 or 16 bit)
//! - [`RowMut`] - Mutable view of a single row, for row-parallel writers
//! - [`PixelRead`] / [`PixelWrite`] - Traits the blend engine is generic over
//!
//! # Memory Layout
//!
//! Pixels are stored row-major, top-to-bottom, channels interleaved:
//!
//! ```text
//! Gray8:  [Y Y Y Y ...]              <- Row 0
//! Rgba16: [R G B A R G B A ...]      <- Row 0, one u16 per sample
//! ```
//!
//! # Bounds
//!
//! Reads outside `[0, width) x [0, height)` return the zero sample
//! (transparent black) and writes outside it are dropped. Callers that
//! overshoot the last row or column by one never fault.
//!
//! # Example
//!
//! ```rust
//! use bitblend_core::{ColorModel, Raster, Rgba};
//!
//! let mut img = Raster::new(ColorModel::Nrgba8, 2, 2);
//! img.set(1, 0, Rgba::new(255, 0, 0, 255));
//! assert_eq!(img.rgba8(1, 0), Rgba::new(255, 0, 0, 255));
//! assert_eq!(img.sample(2, 0), Rgba::default());
//! ```

use crate::pixel::{self, Rgba, Sample};
use crate::{ColorModel, Error, Result, SampleDepth};

/// Read access to a raster's normalized samples.
pub trait PixelRead {
    /// Returns (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the color model of the stored samples.
    fn color_model(&self) -> ColorModel;

    /// Returns the 16-bit sample at (x, y), or zero when out of bounds.
    fn sample(&self, x: u32, y: u32) -> Rgba<u16>;
}

/// Write access to a raster.
pub trait PixelWrite {
    /// Stores `color` at (x, y); out of bounds writes are ignored.
    fn set(&mut self, x: u32, y: u32, color: Rgba<u8>);
}

/// Sample storage of a [`Raster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterData {
    /// 8-bit samples.
    U8(Vec<u8>),
    /// 16-bit samples.
    U16(Vec<u16>),
}

impl RasterData {
    /// Number of samples stored.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    /// Returns `true` if no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage depth.
    pub fn depth(&self) -> SampleDepth {
        match self {
            Self::U8(_) => SampleDepth::U8,
            Self::U16(_) => SampleDepth::U16,
        }
    }
}

/// Owned raster with a runtime color model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    model: ColorModel,
    data: RasterData,
}

impl Raster {
    /// Creates a zero-initialized raster.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails (extremely large images).
    pub fn new(model: ColorModel, width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * model.channels();
        let data = match model.depth() {
            SampleDepth::U8 => RasterData::U8(vec![0; len]),
            SampleDepth::U16 => RasterData::U16(vec![0; len]),
        };
        Self {
            width,
            height,
            model,
            data,
        }
    }

    /// Creates a raster with every pixel set to `color`.
    ///
    /// The color goes through the model's conversion, exactly as
    /// [`set`](Self::set) would store it.
    pub fn filled(model: ColorModel, width: u32, height: u32, color: Rgba<u8>) -> Self {
        let mut raster = Self::new(model, width, height);
        for mut row in raster.rows_mut() {
            for x in 0..width {
                row.set(x, color);
            }
        }
        raster
    }

    /// Wraps existing 8-bit samples.
    ///
    /// # Errors
    ///
    /// - [`Error::DepthMismatch`] if `model` stores 16-bit samples
    /// - [`Error::InvalidDimensions`] if `data.len()` is not
    ///   `width * height * channels`
    pub fn from_u8(model: ColorModel, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(model, width, height, RasterData::U8(data))
    }

    /// Wraps existing 16-bit samples.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_u8`](Self::from_u8).
    pub fn from_u16(model: ColorModel, width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
        Self::from_data(model, width, height, RasterData::U16(data))
    }

    /// Wraps existing sample storage.
    pub fn from_data(model: ColorModel, width: u32, height: u32, data: RasterData) -> Result<Self> {
        if data.depth() != model.depth() {
            return Err(Error::depth_mismatch(
                model.name(),
                model.depth().name(),
                data.depth().name(),
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(model.channels()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            model,
            data,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the color model.
    #[inline]
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Returns the sample storage.
    #[inline]
    pub fn data(&self) -> &RasterData {
        &self.data
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples per row.
    #[inline]
    fn row_len(&self) -> usize {
        self.width as usize * self.model.channels()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.model.channels())
    }

    /// Returns the 16-bit sample at (x, y), zero when out of bounds.
    pub fn sample(&self, x: u32, y: u32) -> Rgba<u16> {
        let Some(start) = self.offset(x, y) else {
            return Rgba::default();
        };
        let end = start + self.model.channels();
        match &self.data {
            RasterData::U8(v) => pixel::decode(self.model, &v[start..end]),
            RasterData::U16(v) => pixel::decode(self.model, &v[start..end]),
        }
    }

    /// Returns the pixel at (x, y) reduced to 8 bits per channel.
    pub fn rgba8(&self, x: u32, y: u32) -> Rgba<u8> {
        self.sample(x, y).narrow()
    }

    /// Stores `color` at (x, y) through the model's conversion.
    ///
    /// Out of bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let Some(start) = self.offset(x, y) else {
            return;
        };
        let end = start + self.model.channels();
        match &mut self.data {
            RasterData::U8(v) => pixel::encode(self.model, color, &mut v[start..end]),
            RasterData::U16(v) => pixel::encode(self.model, color, &mut v[start..end]),
        }
    }

    /// Splits the raster into disjoint mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> Vec<RowMut<'_>> {
        let model = self.model;
        let row_len = self.row_len();
        if row_len == 0 {
            return Vec::new();
        }
        match &mut self.data {
            RasterData::U8(v) => v
                .chunks_mut(row_len)
                .enumerate()
                .map(|(y, row)| RowMut::new(model, y as u32, RowData::U8(row)))
                .collect(),
            RasterData::U16(v) => v
                .chunks_mut(row_len)
                .enumerate()
                .map(|(y, row)| RowMut::new(model, y as u32, RowData::U16(row)))
                .collect(),
        }
    }
}

impl PixelRead for Raster {
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn color_model(&self) -> ColorModel {
        self.model
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Rgba<u16> {
        Raster::sample(self, x, y)
    }
}

impl PixelWrite for Raster {
    #[inline]
    fn set(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        Raster::set(self, x, y, color)
    }
}

enum RowData<'a> {
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
}

/// Mutable view of one raster row.
///
/// Rows returned by [`Raster::rows_mut`] never overlap, so they can be
/// handed to different threads.
pub struct RowMut<'a> {
    model: ColorModel,
    y: u32,
    data: RowData<'a>,
}

impl<'a> RowMut<'a> {
    fn new(model: ColorModel, y: u32, data: RowData<'a>) -> Self {
        Self { model, y, data }
    }

    /// Row index within the raster.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Row width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        let len = match &self.data {
            RowData::U8(v) => v.len(),
            RowData::U16(v) => v.len(),
        };
        (len / self.model.channels()) as u32
    }

    /// Stores `color` at column `x`; out of bounds writes are ignored.
    pub fn set(&mut self, x: u32, color: Rgba<u8>) {
        match &mut self.data {
            RowData::U8(v) => store(self.model, v, x, color),
            RowData::U16(v) => store(self.model, v, x, color),
        }
    }
}

#[inline]
fn store<T: Sample>(model: ColorModel, row: &mut [T], x: u32, color: Rgba<u8>) {
    let channels = model.channels();
    let start = x as usize * channels;
    if let Some(px) = row.get_mut(start..start + channels) {
        pixel::encode(model, color, px);
    }
}
