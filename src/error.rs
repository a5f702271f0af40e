use thiserror::Error;

/// Errors from slice planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Crop rectangle has zero width or height (or is inverted)
    #[error("Invalid crop: {width}x{height} (both dimensions must be positive)")]
    InvalidCrop { width: u32, height: u32 },

    /// Slice height must be at least one pixel
    #[error("Invalid slice height: {0} (must be positive)")]
    InvalidSliceHeight(u32),
}

/// Errors from rendering, encoding and packaging slices.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Slice planning failed before any pixel work started
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Source image could not be read for a requested rectangle
    #[error("Decode failed: {message}")]
    DecodeFailed { message: String },

    /// Surface could not be serialized to the requested format
    #[error("Encode failed: {message}")]
    EncodeFailed { message: String },

    /// Archive assembly failed
    #[error("Packaging failed: {message}")]
    PackageFailed { message: String },
}
