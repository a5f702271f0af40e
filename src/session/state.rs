//! Session state coordinator.
//!
//! [`SlicerSession`] is the explicit mutable state the host UI drives: the
//! currently loaded image, the crop rectangle, the slice height and output
//! spec, and the processing flag. The planner and engine stay pure; every
//! run reads a snapshot of this state at invocation time.
//!
//! Error policy at this layer mirrors the two paths' importance. A full
//! run surfaces exactly one terminal failure (logged, nothing partial is
//! emitted). Estimation is advisory: its failures are logged and swallowed
//! into "no estimate available".

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::RenderError;
use crate::output::{clamp_quality, OutputFormat, OutputSpec};
use crate::package::SliceOutput;
use crate::plan::{plan, CropRect};
use crate::render::SliceEngine;
use crate::source::{DecodedImage, PixelSource};

use super::estimator::DebouncedEstimator;

/// Default slice height in pixels.
pub const DEFAULT_SLICE_HEIGHT: u32 = 1000;

// =============================================================================
// SlicerSession
// =============================================================================

/// Top-level coordinator state for one slicing workspace.
pub struct SlicerSession {
    source: Option<Arc<DecodedImage>>,
    file_name: String,
    crop: CropRect,
    slice_height: u32,
    spec: OutputSpec,
    processing: bool,
    engine: SliceEngine,
}

impl SlicerSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self {
            source: None,
            file_name: String::new(),
            crop: CropRect {
                top: 0,
                bottom: 0,
                left: 0,
                right: 0,
            },
            slice_height: DEFAULT_SLICE_HEIGHT,
            spec: OutputSpec::default(),
            processing: false,
            engine: SliceEngine::new(),
        }
    }

    /// Decode an image and make it the session's source.
    ///
    /// Resets the crop to the full image, as loading a new file discards
    /// any previous crop. Returns the natural dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DecodeFailed`] if the bytes cannot be
    /// decoded; the previous source (if any) is left untouched.
    pub fn load_image(&mut self, data: &[u8], file_name: &str) -> Result<(u32, u32), RenderError> {
        let decoded = DecodedImage::decode(data)?;
        let dimensions = decoded.dimensions();

        debug!(
            file = file_name,
            width = dimensions.0,
            height = dimensions.1,
            format = decoded.source_format().name(),
            "image loaded"
        );

        self.crop = CropRect::full(dimensions.0, dimensions.1);
        self.file_name = file_name.to_string();
        self.source = Some(Arc::new(decoded));
        Ok(dimensions)
    }

    /// Unload the current image.
    pub fn clear(&mut self) {
        self.source = None;
        self.file_name.clear();
        self.crop = CropRect {
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
        };
    }

    /// Whether an image is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Natural dimensions of the loaded image, if any.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|s| s.dimensions())
    }

    /// Current crop rectangle.
    pub fn crop(&self) -> CropRect {
        self.crop
    }

    /// Replace the crop rectangle (e.g. from the drag controller).
    pub fn set_crop(&mut self, crop: CropRect) {
        self.crop = crop;
    }

    /// Current slice height.
    pub fn slice_height(&self) -> u32 {
        self.slice_height
    }

    /// Set the slice height. Stored as given; the planner rejects zero.
    pub fn set_slice_height(&mut self, slice_height: u32) {
        self.slice_height = slice_height;
    }

    /// Current output spec.
    pub fn output_spec(&self) -> OutputSpec {
        self.spec
    }

    /// Set the output format choice.
    pub fn set_format(&mut self, format: OutputFormat) {
        self.spec.format = format;
    }

    /// Set the encoding quality, clamped into `[0.1, 1.0]`.
    pub fn set_quality(&mut self, quality: f32) {
        self.spec.quality = clamp_quality(quality);
    }

    /// Whether a full run is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Run the full slice-and-package operation on the current state.
    ///
    /// # Errors
    ///
    /// Returns a single terminal [`RenderError`], from planning, any
    /// slice's render/encode, or packaging. No partial output is produced;
    /// the caller adjusts inputs and re-triggers.
    pub async fn run(&mut self) -> Result<SliceOutput, RenderError> {
        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                return Err(RenderError::DecodeFailed {
                    message: "no image loaded".to_string(),
                })
            }
        };

        self.processing = true;
        let result = self
            .engine
            .slice_and_package(
                source.as_ref(),
                &self.crop,
                self.slice_height,
                &self.spec,
                &self.file_name,
            )
            .await;
        self.processing = false;

        match &result {
            Ok(output) => {
                debug!(
                    file = output.file_name(),
                    bytes = output.data().len(),
                    archive = output.is_archive(),
                    "slicing run complete"
                );
            }
            Err(e) => {
                error!(error = %e, "slicing run failed");
            }
        }

        result
    }

    /// Estimate the total output size for the current state.
    ///
    /// Returns `None` ("no estimate available") instead of an error:
    /// estimation is a convenience, never a blocking failure. Typical
    /// `None` causes: no image loaded, zero-area crop, zero slice height.
    pub async fn estimate(&self) -> Option<u64> {
        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => return None,
        };

        estimate_snapshot(source.as_ref(), &self.crop, self.slice_height, &self.spec).await
    }

    /// Schedule a debounced estimation of the current state.
    ///
    /// Takes a snapshot of the inputs now; the estimator decides later
    /// whether the snapshot is still the newest when it fires. With no
    /// image loaded the estimator is invalidated immediately ("no
    /// estimate").
    ///
    /// Returns the spawned task handle, or `None` if nothing was
    /// scheduled.
    pub fn schedule_estimate(&self, estimator: &DebouncedEstimator) -> Option<JoinHandle<()>> {
        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                estimator.invalidate();
                return None;
            }
        };
        let crop = self.crop;
        let slice_height = self.slice_height;
        let spec = self.spec;

        Some(estimator.schedule(move || async move {
            estimate_snapshot(source.as_ref(), &crop, slice_height, &spec).await
        }))
    }
}

impl Default for SlicerSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Estimate a snapshot of session inputs, swallowing errors to `None`.
///
/// Runs on the estimator task with its own scratch surface, so an in-flight
/// full run never contends for the session's engine.
async fn estimate_snapshot(
    source: &DecodedImage,
    crop: &CropRect,
    slice_height: u32,
    spec: &OutputSpec,
) -> Option<u64> {
    let descriptors = match plan(crop, slice_height) {
        Ok(descriptors) => descriptors,
        Err(e) => {
            debug!(error = %e, "estimate unavailable");
            return None;
        }
    };

    let mut engine = SliceEngine::new();
    match engine
        .estimate_total_size(source, crop, &descriptors, spec)
        .await
    {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(error = %e, "estimate failed");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
