//! Pixel access for decoded source images.
//!
//! This module defines the [`PixelSource`] trait, the read accessor the
//! rendering engine uses to pull pixel rectangles out of a source image,
//! and [`DecodedImage`], the in-memory implementation backed by a decoded
//! raster.
//!
//! The source is decoded exactly once, up front, and is immutable from then
//! on; the engine never mutates it. Region reads are 1:1 pixel copies in
//! natural image space; there is no resampling anywhere in the pipeline.

use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};

use crate::error::RenderError;

use super::format::{detect_format, SourceFormat};

// =============================================================================
// Region
// =============================================================================

/// A pixel rectangle in natural image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge, pixels from the left of the image
    pub x: u32,

    /// Top edge, pixels from the top of the image
    pub y: u32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// =============================================================================
// PixelSource Trait
// =============================================================================

/// Read accessor for pixel rectangles of a source image.
///
/// Implemented by [`DecodedImage`] for in-memory decoded rasters; tests
/// implement it with mock sources to exercise failure paths without real
/// image data.
///
/// Region reads are potentially suspending (image decode may be
/// asynchronous on some hosts), hence the async trait. The engine calls
/// them strictly sequentially, slice by slice.
#[async_trait]
pub trait PixelSource: Send + Sync {
    /// Natural dimensions `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// The encoding the source bytes arrived in.
    ///
    /// This is what `OutputFormat::Original` resolves against.
    fn source_format(&self) -> SourceFormat;

    /// Read a pixel rectangle as RGBA, unscaled.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DecodeFailed`] if the region extends outside
    /// the natural bounds or the pixels cannot be read.
    async fn read_region(&self, region: Region) -> Result<RgbaImage, RenderError>;
}

// =============================================================================
// DecodedImage
// =============================================================================

/// A source image decoded into an in-memory RGBA raster.
///
/// Holds the pixel data plus the native encoding detected from the input
/// bytes. Decode happens once in [`DecodedImage::decode`]; every region
/// read afterwards is a plain memory copy.
pub struct DecodedImage {
    pixels: RgbaImage,
    format: SourceFormat,
}

impl DecodedImage {
    /// Decode source bytes into a raster, detecting the native encoding.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DecodeFailed`] if the bytes are not a
    /// decodable image.
    pub fn decode(data: &[u8]) -> Result<Self, RenderError> {
        let format = detect_format(data);
        let image = image::load_from_memory(data).map_err(|e| RenderError::DecodeFailed {
            message: format!("could not decode source image: {}", e),
        })?;

        Ok(Self {
            pixels: image.to_rgba8(),
            format,
        })
    }

    /// Wrap an already-decoded image, with an explicitly known encoding.
    pub fn from_image(image: DynamicImage, format: SourceFormat) -> Self {
        Self {
            pixels: image.to_rgba8(),
            format,
        }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

#[async_trait]
impl PixelSource for DecodedImage {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn source_format(&self) -> SourceFormat {
        self.format
    }

    async fn read_region(&self, region: Region) -> Result<RgbaImage, RenderError> {
        let (width, height) = self.pixels.dimensions();

        let right = region.x.checked_add(region.width);
        let bottom = region.y.checked_add(region.height);
        let in_bounds = match (right, bottom) {
            (Some(r), Some(b)) => r <= width && b <= height,
            _ => false,
        };

        if !in_bounds {
            return Err(RenderError::DecodeFailed {
                message: format!(
                    "region {}x{} at ({}, {}) outside image bounds {}x{}",
                    region.width, region.height, region.x, region.y, width, height
                ),
            });
        }

        Ok(image::imageops::crop_imm(&self.pixels, region.x, region.y, region.width, region.height)
            .to_image())
    }
}

// =============================================================================
// Tests
// =============================================================================
