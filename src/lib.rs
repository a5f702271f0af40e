//! # Image Slicer
//!
//! Core engine for cropping a long raster image and slicing it into a
//! vertical sequence of fixed-height chunks.
//!
//! This library provides the in-process core behind an interactive image
//! slicer: the host UI supplies a decoded image, a crop rectangle, a slice
//! height and an output format/quality choice; the core hands back named,
//! encoded slice files, bundled into a zip archive when there is more
//! than one, plus a cheap running estimate of the total output size.
//!
//! ## Features
//!
//! - **Deterministic planning**: slice boundaries are pure geometry,
//!   computed fresh from the crop and slice height on every run
//! - **Pixel-accurate rendering**: 1:1 copies of source rectangles, no
//!   resampling; transparent pixels flatten to white for JPEG output and
//!   survive untouched in PNG output
//! - **Format handling**: JPEG and PNG output, with `Original` resolving
//!   to the source's detected encoding
//! - **Live size estimation**: debounced first-slice extrapolation with
//!   stale-result protection
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`plan`] - Crop validation and slice boundary computation
//! - [`source`] - Source image decode, format detection and pixel access
//! - [`render`] - Scratch surface, encoders and the slicing engine
//! - [`package`] - Output naming and zip packaging
//! - [`session`] - Coordinator state, crop dragging, debounced estimation
//! - [`output`] - Output format and quality types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use image_slicer::{OutputSpec, SlicerSession};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut session = SlicerSession::new();
//!
//!     // Bytes typically arrive from a file picker or drag-and-drop
//!     let data: Vec<u8> = std::fs::read("page.png").unwrap();
//!     session.load_image(&data, "page.png").unwrap();
//!     session.set_slice_height(1000);
//!
//!     match session.run().await {
//!         Ok(output) => println!("{}: {} bytes", output.file_name(), output.data().len()),
//!         Err(e) => eprintln!("slicing failed: {}", e),
//!     }
//! }
//! ```

pub mod error;
pub mod output;
pub mod package;
pub mod plan;
pub mod render;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use error::{PlanError, RenderError};
pub use output::{
    clamp_quality, is_valid_quality, jpeg_quality, EncodedFormat, OutputFormat, OutputSpec,
    DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY,
};
pub use package::{archive_name, artifact_name, base_name, SliceArtifact, SliceOutput};
pub use plan::{plan, CropRect, SliceDescriptor};
pub use render::{ScratchSurface, SliceEncoder, SliceEngine};
pub use session::{
    DebouncedEstimator, DragController, DragState, Handle, SlicerSession, DEFAULT_SLICE_HEIGHT,
    ESTIMATE_DEBOUNCE, MIN_HANDLE_GAP,
};
pub use source::{detect_format, DecodedImage, PixelSource, Region, SourceFormat};
