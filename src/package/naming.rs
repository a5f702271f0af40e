//! Output file naming.
//!
//! Names derive from the caller-supplied original file name with its final
//! extension stripped:
//!
//! - single slice: `<base>_processed.<ext>`
//! - multiple slices: `<base>_<NNN>.<ext>` (3-digit, zero-padded, 1-based)
//! - archive: `<base>_slices.zip`
//!
//! The extension is `png` for PNG output and `jpg` for anything else.

use crate::output::EncodedFormat;

/// Strip the final extension from a file name.
///
/// Handles these patterns:
/// - `"photo.png"` → `"photo"`
/// - `"photo.final.png"` → `"photo.final"`
/// - `"photo"` → `"photo"` (no extension)
/// - `".hidden"` → `".hidden"` (leading dot is not an extension)
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i > 0 => &file_name[..i],
        _ => file_name,
    }
}

/// Name one slice artifact.
///
/// A run with exactly one slice produces a `_processed` name; otherwise
/// slices are numbered from 001 in render order.
pub fn artifact_name(base: &str, index: usize, total: usize, format: EncodedFormat) -> String {
    let ext = format.extension();
    if total == 1 {
        format!("{base}_processed.{ext}")
    } else {
        format!("{base}_{:03}.{ext}", index + 1)
    }
}

/// Name the archive holding a multi-slice run.
pub fn archive_name(base: &str) -> String {
    format!("{base}_slices.zip")
}
