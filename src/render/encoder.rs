//! Slice encoder.
//!
//! This module serializes the scratch surface into the target encoding.
//!
//! # Design Decisions
//!
//! - **Always re-encode**: every slice is encoded fresh from surface
//!   pixels, even when the source encoding matches the output. No
//!   passthrough optimization.
//!
//! - **No resizing**: slices are encoded at their native size; the surface
//!   already holds the 1:1 pixel copy.
//!
//! - **Quality control**: JPEG quality is configurable per run, letting the
//!   caller trade file size against fidelity. PNG is lossless and ignores
//!   the quality parameter.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};

use crate::error::RenderError;
use crate::output::{jpeg_quality, EncodedFormat};

/// Encoder for slice surfaces.
#[derive(Debug, Clone, Default)]
pub struct SliceEncoder {
    // Currently stateless, but struct allows future extension
    // (e.g. shared encoder settings)
}

impl SliceEncoder {
    /// Create a new slice encoder.
    pub fn new() -> Self {
        Self {}
    }

    /// Encode surface pixels at the given format and quality.
    ///
    /// # Arguments
    ///
    /// * `surface` - RGBA pixels to serialize
    /// * `format` - Resolved output encoding
    /// * `quality` - Encoding quality in `[0.1, 1.0]`; ignored for PNG
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EncodeFailed`] if the surface cannot be
    /// serialized.
    pub fn encode(
        &self,
        surface: &RgbaImage,
        format: EncodedFormat,
        quality: f32,
    ) -> Result<Bytes, RenderError> {
        match format {
            EncodedFormat::Jpeg => self.encode_jpeg(surface, jpeg_quality(quality)),
            EncodedFormat::Png => self.encode_png(surface),
        }
    }

    /// Encode as JPEG, dropping the alpha channel.
    ///
    /// The surface was white-filled before drawing, so every pixel is
    /// already opaque; the conversion just strips the alpha byte JPEG
    /// cannot carry.
    fn encode_jpeg(&self, surface: &RgbaImage, quality: u8) -> Result<Bytes, RenderError> {
        let (width, height) = surface.dimensions();

        let mut rgb = RgbImage::new(width, height);
        for (rgb_pixel, rgba_pixel) in rgb.pixels_mut().zip(surface.pixels()) {
            rgb_pixel.0 = [rgba_pixel[0], rgba_pixel[1], rgba_pixel[2]];
        }

        let mut output = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| RenderError::EncodeFailed {
                message: format!("JPEG encode failed: {}", e),
            })?;

        Ok(Bytes::from(output))
    }

    /// Encode as PNG, RGBA, alpha preserved.
    fn encode_png(&self, surface: &RgbaImage) -> Result<Bytes, RenderError> {
        let (width, height) = surface.dimensions();

        let mut output = Vec::new();
        PngEncoder::new(&mut output)
            .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| RenderError::EncodeFailed {
                message: format!("PNG encode failed: {}", e),
            })?;

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Tests
// =============================================================================
