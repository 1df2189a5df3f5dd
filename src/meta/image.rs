//! Image metadata extraction
//!
//! Dimensions always come from the decoded image header, never from EXIF
//! tags. Capture time comes from EXIF when present, mtime otherwise.

use crate::error::{Error, Result};
use crate::meta::{Metadata, modified_time};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

/// EXIF tags to try for the capture date, in priority order
const DATE_TAGS: &[Tag] = &[Tag::DateTimeOriginal, Tag::DateTime];

/// Resolve metadata for an image file.
pub fn resolve_image(path: &Path) -> Result<Metadata> {
    let (width, height) = image::image_dimensions(path).map_err(|e| Error::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let taken_at = match extract_exif_time(path) {
        Ok(time) => {
            debug!(?path, %time, "Extracted capture time from EXIF");
            time
        }
        Err(e) => {
            trace!(?path, error = %e, "No EXIF capture time");
            modified_time(path)?
        }
    };

    Ok(Metadata {
        taken_at,
        width,
        height,
    })
}

/// Extract the capture time from EXIF metadata.
fn extract_exif_time(path: &Path) -> Result<NaiveDateTime> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for tag in DATE_TAGS {
        if let Some(field) = exif.get_field(*tag, In::PRIMARY)
            && let Some(datetime) = parse_exif_datetime(&field.display_value().to_string())
        {
            trace!(?path, ?tag, "Found EXIF date tag");
            return Ok(datetime);
        }
    }

    Err(Error::ExifRead {
        path: path.to_path_buf(),
        message: "No valid date tag found in EXIF data".to_string(),
    })
}

/// Parse the EXIF datetime format `YYYY:MM:DD HH:MM:SS`.
///
/// kamadak-exif renders DateTime fields with dashes, so that spelling is
/// accepted as well.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_matches('"');

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use tempfile::TempDir;

    #[test]
    fn test_parse_exif_datetime() {
        let dt = parse_exif_datetime("2024:01:15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);

        // Quoted display values
        let dt = parse_exif_datetime("\"2024:01:15 14:30:00\"").unwrap();
        assert_eq!(dt.year(), 2024);

        // Display-formatted spelling
        let dt = parse_exif_datetime("2024-01-15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);

        assert!(parse_exif_datetime("invalid").is_none());
        assert!(parse_exif_datetime("2024:13:40 99:99:99").is_none());
    }

    #[test]
    fn test_resolve_image_dimensions_and_mtime_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");
        let img = image::RgbImage::from_pixel(640, 480, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        // PNG from the image crate carries no EXIF, so the capture time
        // must come from mtime and dimensions from the pixel header.
        let meta = resolve_image(&path).unwrap();
        assert_eq!(meta.width, 640);
        assert_eq!(meta.height, 480);
    }

    #[test]
    fn test_resolve_image_rejects_undecodable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, vec![0u8; 256]).unwrap();

        assert!(resolve_image(&path).is_err());
    }
}
