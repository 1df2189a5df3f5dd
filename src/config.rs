//! Runtime configuration for a renaming run

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

/// Files smaller than this are rejected before any decode attempt.
/// Guards against zero-byte and truncated files.
pub const MIN_FILE_SIZE: u64 = 100;

/// Supported image extensions (lowercase)
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "tiff", "tif", "bmp", "gif", "webp", "heic",
];

/// Supported video extensions (lowercase)
pub const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4"];

/// Configuration for a single batch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Input directory to scan for media files
    pub input_dir: PathBuf,

    /// Output directory for renamed files
    pub output_dir: PathBuf,

    /// Dry run mode - compute and report decisions without touching the filesystem
    pub dry_run: bool,

    /// Move files within the source tree instead of copying to a separate tree
    pub in_place: bool,

    /// Inclusive lower bound on capture time, applied after the chronological sort
    pub start_from: Option<NaiveDateTime>,

    /// Verbose output
    pub verbose: bool,

    /// Maximum number of bytes hashed per file (None = whole file)
    pub hash_prefix_limit: Option<u64>,
}

impl Config {
    /// Check if a file extension is a supported image format
    pub fn is_image(ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        IMAGE_EXTENSIONS.iter().any(|e| *e == ext_lower)
    }

    /// Check if a file extension is a supported video format
    pub fn is_video(ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        VIDEO_EXTENSIONS.iter().any(|e| *e == ext_lower)
    }

    /// Check if a file extension is supported at all
    pub fn is_supported(ext: &str) -> bool {
        Self::is_image(ext) || Self::is_video(ext)
    }
}

/// Parse a `YYYY/MM` cutoff string into the first instant of that month.
///
/// A malformed cutoff is a configuration error and aborts the whole run.
pub fn parse_cutoff(input: &str) -> Result<NaiveDateTime> {
    let invalid = || Error::InvalidCutoff {
        input: input.to_string(),
    };

    let (year_str, month_str) = input.split_once('/').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_extension_classification() {
        assert!(Config::is_image("jpg"));
        assert!(Config::is_image("JPG"));
        assert!(Config::is_image("heic"));
        assert!(Config::is_video("mp4"));
        assert!(Config::is_video("MOV"));
        assert!(!Config::is_image("mp4"));
        assert!(!Config::is_supported("txt"));
        assert!(!Config::is_supported(""));
    }

    #[test]
    fn test_parse_cutoff() {
        let dt = parse_cutoff("2023/06").unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn test_parse_cutoff_rejects_malformed() {
        assert!(parse_cutoff("2023").is_err());
        assert!(parse_cutoff("2023-06").is_err());
        assert!(parse_cutoff("2023/13").is_err());
        assert!(parse_cutoff("abcd/06").is_err());
        assert!(parse_cutoff("").is_err());
    }
}
