//! Output naming and packaging.
//!
//! The engine renders slices into named [`SliceArtifact`]s; this module
//! decides what the caller actually receives. One slice is handed back
//! directly; two or more are bundled into an in-memory zip archive.
//!
//! # Components
//!
//! - [`SliceArtifact`]: one named, encoded output blob
//! - [`SliceOutput`]: the run's final shape (single file or archive)
//! - [`bundle`]: packaging decision and zip assembly
//! - [`base_name`] / [`artifact_name`] / [`archive_name`]: naming scheme

mod archive;
mod naming;

pub use archive::bundle;
pub use naming::{archive_name, artifact_name, base_name};

use bytes::Bytes;

// =============================================================================
// Artifacts
// =============================================================================

/// One named, encoded output blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceArtifact {
    /// Output file name, including extension
    pub file_name: String,

    /// Encoded bytes
    pub data: Bytes,
}

/// The final output of a slicing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceOutput {
    /// Exactly one slice: the artifact itself, no archive
    Single(SliceArtifact),

    /// Two or more slices bundled into a zip archive
    Archive(SliceArtifact),
}

impl SliceOutput {
    /// The file name the caller should offer for download.
    pub fn file_name(&self) -> &str {
        match self {
            SliceOutput::Single(a) | SliceOutput::Archive(a) => &a.file_name,
        }
    }

    /// The blob to hand off.
    pub fn data(&self) -> &Bytes {
        match self {
            SliceOutput::Single(a) | SliceOutput::Archive(a) => &a.data,
        }
    }

    /// Whether the output is an archive.
    pub fn is_archive(&self) -> bool {
        matches!(self, SliceOutput::Archive(_))
    }
}
