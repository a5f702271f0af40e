//! Source format detection for input images.
//!
//! This module classifies undecoded input bytes by examining magic bytes.
//! The detected format is what `OutputFormat::Original` resolves against:
//! a PNG source keeps PNG encoding (alpha preserved), a JPEG source keeps
//! JPEG, and anything unrecognized falls back to JPEG.
//!
//! Only the two supported raster encodings are distinguished; everything
//! else is [`SourceFormat::Unknown`].

// =============================================================================
// SourceFormat
// =============================================================================

/// Detected encoding of the source image bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JPEG (SOI marker `FF D8 FF`)
    Jpeg,

    /// PNG (8-byte signature `89 50 4E 47 0D 0A 1A 0A`)
    Png,

    /// Not recognized as either supported encoding
    Unknown,
}

impl SourceFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Png => "PNG",
            SourceFormat::Unknown => "unknown",
        }
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// PNG file signature.
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG Start-Of-Image marker plus the leading byte of the first segment.
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Check if bytes start with the PNG signature.
pub fn is_png_header(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_MAGIC.len() && &bytes[..PNG_MAGIC.len()] == PNG_MAGIC
}

/// Check if bytes start with the JPEG SOI marker.
pub fn is_jpeg_header(bytes: &[u8]) -> bool {
    bytes.len() >= JPEG_MAGIC.len() && &bytes[..JPEG_MAGIC.len()] == JPEG_MAGIC
}

/// Detect the encoding of source image bytes.
///
/// # Detection Logic
///
/// 1. PNG signature → [`SourceFormat::Png`]
/// 2. JPEG SOI marker → [`SourceFormat::Jpeg`]
/// 3. Anything else → [`SourceFormat::Unknown`]
pub fn detect_format(bytes: &[u8]) -> SourceFormat {
    if is_png_header(bytes) {
        SourceFormat::Png
    } else if is_jpeg_header(bytes) {
        SourceFormat::Jpeg
    } else {
        SourceFormat::Unknown
    }
}

// =============================================================================
// Tests
// =============================================================================
