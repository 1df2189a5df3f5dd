//! Recursive media file discovery
//!
//! Produces a lazy sequence of candidate files under a root directory,
//! skipping hidden entries and unsupported extensions. Ordering is plain
//! filesystem traversal order; the processor owns chronological sorting.

use crate::config::Config;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Kind of media file, decided once from the extension at scan time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A candidate file discovered during scanning
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Absolute source path
    pub path: PathBuf,
    /// Lowercase extension without the leading dot
    pub ext: String,
    /// Image or video, dispatched on during metadata resolution
    pub kind: MediaKind,
}

impl MediaFile {
    /// Classify a path into a `MediaFile`, or `None` if its extension
    /// is not in the supported set.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();

        let kind = if Config::is_video(&ext) {
            MediaKind::Video
        } else if Config::is_image(&ext) {
            MediaKind::Image
        } else {
            return None;
        };

        Some(Self {
            path: path.to_path_buf(),
            ext,
            kind,
        })
    }
}

/// Check whether a directory entry is a hidden file (dot-prefixed name,
/// e.g. `.DS_Store` or thumbnail sidecars)
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Lazily yield all supported media files under `root`, recursing into
/// subdirectories.
pub fn scan_media_files(root: &Path) -> impl Iterator<Item = MediaFile> + use<> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            if is_hidden(path) {
                trace!(?path, "Skipping hidden file");
                return None;
            }
            MediaFile::from_path(path)
        })
}
