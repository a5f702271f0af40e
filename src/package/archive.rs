//! Zip packaging for multi-slice runs.
//!
//! The archive is assembled entirely in memory and handed back as a single
//! blob; nothing is written to disk. Members appear in slice order, so the
//! archive layout is deterministic for a given run.

use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::RenderError;

use super::naming::archive_name;
use super::{SliceArtifact, SliceOutput};

/// Bundle rendered artifacts into the final output.
///
/// A single artifact passes through unarchived; two or more are zipped
/// into `<base>_slices.zip`.
///
/// # Errors
///
/// Returns [`RenderError::PackageFailed`] if the archive cannot be
/// assembled.
pub fn bundle(artifacts: Vec<SliceArtifact>, base: &str) -> Result<SliceOutput, RenderError> {
    let mut artifacts = artifacts;
    if artifacts.len() == 1 {
        if let Some(single) = artifacts.pop() {
            return Ok(SliceOutput::Single(single));
        }
    }

    let data = write_zip(&artifacts)?;
    Ok(SliceOutput::Archive(SliceArtifact {
        file_name: archive_name(base),
        data,
    }))
}

/// Write artifacts into an in-memory zip, in order.
fn write_zip(artifacts: &[SliceArtifact]) -> Result<Bytes, RenderError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for artifact in artifacts {
        zip.start_file(artifact.file_name.as_str(), options)
            .map_err(|e| RenderError::PackageFailed {
                message: format!("zip entry {}: {}", artifact.file_name, e),
            })?;
        zip.write_all(&artifact.data)
            .map_err(|e| RenderError::PackageFailed {
                message: format!("zip write {}: {}", artifact.file_name, e),
            })?;
    }

    let cursor = zip.finish().map_err(|e| RenderError::PackageFailed {
        message: format!("zip finish: {}", e),
    })?;

    Ok(Bytes::from(cursor.into_inner()))
}

// =============================================================================
// Tests
// =============================================================================
