//! Pre-flight validity checks for candidate files
//!
//! Rejects files that are missing, too small, of an unsupported format,
//! or undecodable before any metadata extraction is attempted. Read-only
//! probe with no side effects.

use crate::config::{Config, MIN_FILE_SIZE};
use crate::scan::{MediaFile, MediaKind};
use image::ImageReader;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Check whether a file can enter the processing pipeline.
///
/// Returns `(true, None)` for processable files, or `(false, reason)`
/// with a human-readable rejection reason.
pub fn check_media_file(path: &Path) -> (bool, Option<String>) {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return (false, Some(format!("Cannot access file: {}", e)));
        }
    };

    if metadata.len() < MIN_FILE_SIZE {
        return (
            false,
            Some(format!(
                "File too small ({} bytes, minimum {})",
                metadata.len(),
                MIN_FILE_SIZE
            )),
        );
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if !Config::is_supported(ext) {
        return (false, Some("Unsupported format".to_string()));
    }

    // Image files must at least yield header dimensions; videos are probed
    // later through ffprobe and get no cheap pre-check here.
    if let Some(media) = MediaFile::from_path(path)
        && media.kind == MediaKind::Image
        && let Err(e) = probe_image(path)
    {
        debug!(?path, error = %e, "Image failed decode probe");
        return (false, Some(e));
    }

    (true, None)
}

/// Header-only decode probe; cheap compared to a full pixel decode.
fn probe_image(path: &Path) -> Result<(), String> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| format!("Cannot open image: {}", e))?;

    reader
        .into_dimensions()
        .map(|_| ())
        .map_err(|e| format!("Cannot decode image: {}", e))
}
