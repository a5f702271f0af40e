//! Output format selection and encoding quality.
//!
//! The caller picks an [`OutputFormat`] (possibly `Original`, meaning "same
//! as the input") and a quality in `[0.1, 1.0]`. At render time the choice
//! resolves to a concrete [`EncodedFormat`] against the source's detected
//! encoding; quality is mapped to the JPEG encoder's 1-100 scale and is
//! ignored for PNG (lossless).

use serde::{Deserialize, Serialize};

use crate::source::SourceFormat;

// =============================================================================
// Quality
// =============================================================================

/// Minimum encoding quality.
pub const MIN_QUALITY: f32 = 0.1;

/// Maximum encoding quality.
pub const MAX_QUALITY: f32 = 1.0;

/// Default encoding quality.
pub const DEFAULT_QUALITY: f32 = 0.92;

/// Validate a quality parameter.
///
/// Returns `true` if quality is in the valid range (0.1-1.0).
#[inline]
pub fn is_valid_quality(quality: f32) -> bool {
    (MIN_QUALITY..=MAX_QUALITY).contains(&quality)
}

/// Clamp quality to the valid range.
///
/// Values below 0.1 become 0.1, values above 1.0 become 1.0. NaN becomes
/// the default.
#[inline]
pub fn clamp_quality(quality: f32) -> f32 {
    if quality.is_nan() {
        return DEFAULT_QUALITY;
    }
    quality.clamp(MIN_QUALITY, MAX_QUALITY)
}

/// Map a `[0.1, 1.0]` quality to the JPEG encoder's 1-100 scale.
#[inline]
pub fn jpeg_quality(quality: f32) -> u8 {
    (clamp_quality(quality) * 100.0).round() as u8
}

// =============================================================================
// Formats
// =============================================================================

/// The caller's output format choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Keep the source's native encoding (JPEG if it cannot be determined)
    #[default]
    Original,

    /// Re-encode as JPEG regardless of the source
    Jpeg,

    /// Re-encode as PNG regardless of the source
    Png,
}

/// The concrete encoding resolved for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Resolve the choice against the source's detected encoding.
    ///
    /// `Original` follows the source; an unknown source encoding defaults
    /// to JPEG.
    pub fn resolve(&self, source: SourceFormat) -> EncodedFormat {
        match self {
            OutputFormat::Jpeg => EncodedFormat::Jpeg,
            OutputFormat::Png => EncodedFormat::Png,
            OutputFormat::Original => match source {
                SourceFormat::Png => EncodedFormat::Png,
                SourceFormat::Jpeg | SourceFormat::Unknown => EncodedFormat::Jpeg,
            },
        }
    }
}

impl EncodedFormat {
    /// File extension for artifacts in this encoding.
    pub const fn extension(&self) -> &'static str {
        match self {
            EncodedFormat::Jpeg => "jpg",
            EncodedFormat::Png => "png",
        }
    }

    /// Whether the encoding carries an alpha channel.
    ///
    /// Formats without one get an opaque white fill before drawing, so
    /// transparent source pixels do not rasterize as black.
    pub const fn supports_alpha(&self) -> bool {
        matches!(self, EncodedFormat::Png)
    }

    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            EncodedFormat::Jpeg => "JPEG",
            EncodedFormat::Png => "PNG",
        }
    }
}

// =============================================================================
// OutputSpec
// =============================================================================

/// Output format and quality for one slicing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Output format choice
    pub format: OutputFormat,

    /// Encoding quality in `[0.1, 1.0]`; ignored for PNG
    pub quality: f32,
}

impl OutputSpec {
    /// Create a spec, clamping quality into the valid range.
    pub fn new(format: OutputFormat, quality: f32) -> Self {
        Self {
            format,
            quality: clamp_quality(quality),
        }
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            format: OutputFormat::Original,
            quality: DEFAULT_QUALITY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
