//! Source image abstraction.
//!
//! The source layer owns everything about the input image: detecting its
//! native encoding from magic bytes, decoding it once into an immutable
//! raster, and serving pixel rectangles to the rendering engine through
//! the [`PixelSource`] trait.
//!
//! # Components
//!
//! - [`SourceFormat`]: detected native encoding (JPEG, PNG or unknown)
//! - [`detect_format`]: magic-byte classification of undecoded input
//! - [`PixelSource`]: async read accessor for pixel rectangles
//! - [`DecodedImage`]: in-memory implementation over a decoded raster
//! - [`Region`]: a pixel rectangle in natural image space

mod format;
mod pixels;

pub use format::{detect_format, is_jpeg_header, is_png_header, SourceFormat};
pub use pixels::{DecodedImage, PixelSource, Region};
