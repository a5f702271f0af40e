//! Slice rendering engine.
//!
//! The engine is the orchestration point for a slicing run. It walks the
//! planner's descriptor list in index order and, for each slice:
//!
//! 1. prepares the scratch surface (resize + background fill)
//! 2. reads the source rectangle, 1:1, no resampling
//! 3. encodes the surface at the resolved format and quality
//! 4. names the artifact
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       SliceEngine                       │
//! │  ┌────────────────┐   ┌────────────────┐                │
//! │  │ ScratchSurface │   │  SliceEncoder  │                │
//! │  │ (reused RGBA   │   │ (surface →     │                │
//! │  │  raster)       │   │  JPEG/PNG)     │                │
//! │  └────────────────┘   └────────────────┘                │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ read_region()
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                      PixelSource                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Slices are processed strictly sequentially; the first failure aborts
//! the whole run and no partial output escapes.

use bytes::Bytes;
use tracing::debug;

use crate::error::RenderError;
use crate::output::OutputSpec;
use crate::package::{self, SliceArtifact, SliceOutput};
use crate::plan::{plan, CropRect, SliceDescriptor};
use crate::source::{PixelSource, Region};

use super::encoder::SliceEncoder;
use super::surface::ScratchSurface;

// =============================================================================
// Slice Engine
// =============================================================================

/// Render and package engine for slicing runs.
///
/// Owns the reused scratch surface, so a single engine keeps at most one
/// slice's worth of pixel data alive across a run. Create one per
/// coordinator and reuse it across runs, or create one per run; both are
/// cheap.
pub struct SliceEngine {
    surface: ScratchSurface,
    encoder: SliceEncoder,
}

impl SliceEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self {
            surface: ScratchSurface::new(),
            encoder: SliceEncoder::new(),
        }
    }

    /// Render every descriptor into a named, encoded artifact.
    ///
    /// # Arguments
    ///
    /// * `source` - Pixel source for the decoded image
    /// * `crop` - Crop rectangle the descriptors were planned from
    /// * `descriptors` - Planner output, rendered in index order
    /// * `spec` - Output format and quality
    /// * `file_name` - Original file name; its stem seeds artifact names
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] encountered; no artifacts are
    /// returned from a partially failed run.
    pub async fn render<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        crop: &CropRect,
        descriptors: &[SliceDescriptor],
        spec: &OutputSpec,
        file_name: &str,
    ) -> Result<Vec<SliceArtifact>, RenderError> {
        let format = spec.format.resolve(source.source_format());
        let base = package::base_name(file_name);

        debug!(
            slices = descriptors.len(),
            width = crop.width(),
            format = format.name(),
            "rendering slice run"
        );

        let mut artifacts = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let data = self
                .render_slice(source, crop, descriptor, spec)
                .await?;
            artifacts.push(SliceArtifact {
                file_name: package::artifact_name(
                    base,
                    descriptor.index,
                    descriptors.len(),
                    format,
                ),
                data,
            });
        }

        Ok(artifacts)
    }

    /// Estimate the total output size without rendering every slice.
    ///
    /// Renders and encodes only the first descriptor, then multiplies its
    /// byte size by the descriptor count. This is a linear extrapolation
    /// and deliberately approximate: later slices (the shorter remainder
    /// slice in particular, or slices whose content compresses differently)
    /// will encode to different sizes. The estimate trades accuracy for
    /// being cheap enough to run on every input change.
    ///
    /// An empty descriptor list estimates zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the first slice cannot be rendered or
    /// encoded. Callers that use the estimate for advisory feedback should
    /// swallow the error and report "no estimate available".
    pub async fn estimate_total_size<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        crop: &CropRect,
        descriptors: &[SliceDescriptor],
        spec: &OutputSpec,
    ) -> Result<u64, RenderError> {
        let Some(first) = descriptors.first() else {
            return Ok(0);
        };

        let data = self.render_slice(source, crop, first, spec).await?;
        Ok(data.len() as u64 * descriptors.len() as u64)
    }

    /// Plan, render and package in one call.
    ///
    /// This is the full-run entry point: validates inputs via the planner,
    /// renders every slice, and returns either the lone artifact or a zip
    /// archive of all of them.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] (planning errors included, via `Plan`) on
    /// the first failure; nothing is emitted from a failed run.
    pub async fn slice_and_package<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        crop: &CropRect,
        slice_height: u32,
        spec: &OutputSpec,
        file_name: &str,
    ) -> Result<SliceOutput, RenderError> {
        let descriptors = plan(crop, slice_height)?;
        let artifacts = self
            .render(source, crop, &descriptors, spec, file_name)
            .await?;
        package::bundle(artifacts, package::base_name(file_name))
    }

    /// Render one descriptor to encoded bytes.
    async fn render_slice<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        crop: &CropRect,
        descriptor: &SliceDescriptor,
        spec: &OutputSpec,
    ) -> Result<Bytes, RenderError> {
        let format = spec.format.resolve(source.source_format());
        let width = crop.width();

        self.surface
            .prepare(width, descriptor.source_height, format);

        let region = Region::new(
            crop.left,
            descriptor.source_y,
            width,
            descriptor.source_height,
        );
        let pixels = source.read_region(region).await?;
        self.surface.draw(&pixels, format);

        self.encoder
            .encode(self.surface.pixels(), format, spec.quality)
    }
}

impl Default for SliceEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
