//! Test utilities for integration tests.
//!
//! This module provides synthetic image builders and a request-tracking
//! pixel source for exercising the pipeline without real image files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};

use image_slicer::{DecodedImage, PixelSource, Region, RenderError, SourceFormat};

// =============================================================================
// Synthetic Images
// =============================================================================

/// Build an opaque raster where each pixel encodes its own coordinates.
///
/// Lossless round-trips can then assert exactly which source rectangle a
/// slice was cut from.
pub fn coordinate_raster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 251) as u8, ((x + y) % 251) as u8, 255])
    })
}

/// Encode a raster as PNG bytes.
pub fn png_bytes(raster: &RgbaImage) -> Vec<u8> {
    let mut data = Vec::new();
    DynamicImage::ImageRgba8(raster.clone())
        .write_to(&mut std::io::Cursor::new(&mut data), image::ImageFormat::Png)
        .unwrap();
    data
}

/// Encode a raster as JPEG bytes (alpha flattened by the encoder path).
pub fn jpeg_bytes(raster: &RgbaImage) -> Vec<u8> {
    let mut data = Vec::new();
    DynamicImage::ImageRgba8(raster.clone())
        .to_rgb8()
        .write_to(&mut std::io::Cursor::new(&mut data), image::ImageFormat::Jpeg)
        .unwrap();
    data
}

/// PNG bytes for a fully transparent image.
pub fn transparent_png_bytes(width: u32, height: u32) -> Vec<u8> {
    png_bytes(&RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])))
}

/// Check for JPEG SOI/EOI markers.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 4
        && data[0] == 0xFF
        && data[1] == 0xD8
        && data[data.len() - 2] == 0xFF
        && data[data.len() - 1] == 0xD9
}

/// Check for the PNG signature.
pub fn is_valid_png(data: &[u8]) -> bool {
    data.len() >= 8 && data[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
}

// =============================================================================
// Tracking Pixel Source
// =============================================================================

/// A pixel source that tracks region reads and can fail on demand.
///
/// Wraps a [`DecodedImage`] and records every read, optionally failing
/// from the Nth read onward. Useful for verifying sequential access
/// patterns and the abort-on-first-failure contract.
pub struct TrackingSource {
    inner: DecodedImage,
    read_count: Arc<AtomicUsize>,
    fail_from: Option<usize>,
}

impl TrackingSource {
    pub fn new(raster: RgbaImage, format: SourceFormat) -> Self {
        Self {
            inner: DecodedImage::from_image(DynamicImage::ImageRgba8(raster), format),
            read_count: Arc::new(AtomicUsize::new(0)),
            fail_from: None,
        }
    }

    /// Fail every read starting with the given 0-based read index.
    pub fn failing_from(mut self, read_index: usize) -> Self {
        self.fail_from = Some(read_index);
        self
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PixelSource for TrackingSource {
    fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    fn source_format(&self) -> SourceFormat {
        self.inner.source_format()
    }

    async fn read_region(&self, region: Region) -> Result<RgbaImage, RenderError> {
        let index = self.read_count.fetch_add(1, Ordering::SeqCst);
        if let Some(fail_from) = self.fail_from {
            if index >= fail_from {
                return Err(RenderError::DecodeFailed {
                    message: format!("injected failure on read {}", index),
                });
            }
        }
        self.inner.read_region(region).await
    }
}
