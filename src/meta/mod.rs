//! Per-file metadata resolution
//!
//! Dispatches on media kind to two independent resolvers sharing one
//! result type:
//! - images: decoded pixel dimensions + EXIF capture time
//! - videos: ffprobe stream dimensions + container date tags
//!
//! Both degrade to the filesystem modification time when no embedded
//! capture time is available; they fail only when dimensions cannot be
//! determined at all.

pub mod image;
pub mod video;

use crate::error::Result;
use crate::scan::{MediaFile, MediaKind};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Canonical identity extracted from a media file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Best-known capture time (embedded metadata, or mtime fallback)
    pub taken_at: NaiveDateTime,
    /// Pixel width, always > 0
    pub width: u32,
    /// Pixel height, always > 0
    pub height: u32,
}

/// Resolve capture time and dimensions for a media file.
///
/// A failure here means the file is skipped by the processor; it never
/// aborts the batch.
pub fn resolve(file: &MediaFile) -> Result<Metadata> {
    match file.kind {
        MediaKind::Image => image::resolve_image(&file.path),
        MediaKind::Video => video::resolve_video(&file.path),
    }
}

/// Filesystem modification time, the last fallback in every capture-time
/// chain.
pub(crate) fn modified_time(path: &Path) -> Result<NaiveDateTime> {
    let metadata = fs::metadata(path)?;
    let modified = metadata.modified()?;
    let datetime: chrono::DateTime<chrono::Utc> = modified.into();

    warn!(?path, "Using file system modification time as capture time");
    Ok(datetime.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_modified_time_reflects_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"x").unwrap();

        let forced = Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(forced.timestamp(), 0)).unwrap();

        let taken = modified_time(&path).unwrap();
        assert_eq!(taken, forced.naive_utc());
        assert_eq!(taken.year(), 2023);
    }

    #[test]
    fn test_modified_time_missing_file_errors() {
        assert!(modified_time(Path::new("/no/such/file.mp4")).is_err());
    }
}
