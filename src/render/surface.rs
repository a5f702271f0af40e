//! Scratch raster surface for slice rendering.
//!
//! One surface's worth of pixel data is live at a time: the engine reuses
//! a single [`ScratchSurface`] across slices, reallocating only when the
//! slice dimensions change (the remainder slice is typically shorter).
//!
//! Preparation depends on the output encoding. Formats without an alpha
//! channel get an opaque white fill before drawing, so transparent source
//! pixels do not rasterize as black; PNG output clears to transparent and
//! source alpha survives the copy.

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::output::EncodedFormat;

/// Opaque white, the background for alpha-less output formats.
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Fully transparent, the background for PNG output.
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A reusable scratch raster the size of one slice.
pub struct ScratchSurface {
    pixels: RgbaImage,
}

impl ScratchSurface {
    /// Create an empty surface; the first [`prepare`](Self::prepare) call
    /// allocates it.
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
        }
    }

    /// Resize (if needed) and clear the surface for the given output format.
    pub fn prepare(&mut self, width: u32, height: u32, format: EncodedFormat) {
        if self.pixels.dimensions() != (width, height) {
            self.pixels = RgbaImage::new(width, height);
        }

        let background = if format.supports_alpha() {
            TRANSPARENT
        } else {
            WHITE
        };
        for pixel in self.pixels.pixels_mut() {
            *pixel = background;
        }
    }

    /// Copy the slice pixels onto the surface at the origin, 1:1.
    ///
    /// White-filled surfaces composite the copy over the background
    /// (alpha-over), flattening transparency into white; PNG surfaces take
    /// it verbatim, alpha included.
    pub fn draw(&mut self, slice_pixels: &RgbaImage, format: EncodedFormat) {
        if format.supports_alpha() {
            imageops::replace(&mut self.pixels, slice_pixels, 0, 0);
        } else {
            imageops::overlay(&mut self.pixels, slice_pixels, 0, 0);
        }
    }

    /// The current pixel contents.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl Default for ScratchSurface {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
