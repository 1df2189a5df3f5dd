//! Canonical destination naming
//!
//! Every file lands at `<output>/<YYYY>/<MonthName>/<stem>.<ext>` where the
//! stem is derived entirely from metadata and content hash:
//! `YYYY-MM-DD_HH.MM.SS.ssss_WIDTHxHEIGHT_HASH`. Identical identity always
//! produces an identical path, which is what makes re-runs idempotent.

use crate::error::{Error, Result};
use crate::meta::Metadata;
use chrono::Timelike;
use std::path::{Path, PathBuf};

/// Canonical relative destination for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationName {
    /// 4-digit year folder
    pub year: String,
    /// Full English month name folder (e.g. "June")
    pub month: String,
    /// Metadata-derived filename including extension
    pub filename: String,
}

impl DestinationName {
    /// Relative path `YYYY/MonthName/filename`
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.year).join(&self.month).join(&self.filename)
    }
}

/// How a computed destination resolved against the existing tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDestination {
    /// The exact computed path already exists: treated as an intentional
    /// duplicate of the same capture and skipped without writing.
    AlreadyExists(PathBuf),
    /// A free path to write to (counter-suffixed if needed)
    Fresh(PathBuf),
}

/// Build the canonical destination name from metadata, content hash and
/// the lower-cased source extension.
pub fn destination_name(meta: &Metadata, hash: &str, ext: &str) -> DestinationName {
    // First 4 digits of the zero-padded 6-digit microsecond value
    let micros = format!("{:06}", meta.taken_at.time().nanosecond() / 1_000);
    let stamp = meta.taken_at.format("%Y-%m-%d_%H.%M.%S");

    DestinationName {
        year: meta.taken_at.format("%Y").to_string(),
        // chrono's %B is always the English month name, locale-invariant
        month: meta.taken_at.format("%B").to_string(),
        filename: format!(
            "{}.{}_{}x{}_{}.{}",
            stamp,
            &micros[..4],
            meta.width,
            meta.height,
            hash,
            ext
        ),
    }
}

/// Resolve a destination name against the output tree.
///
/// An exact-path hit is reported as a duplicate to skip; same-name hits
/// are never compared by content (documented simplification). Otherwise
/// the first free path is returned, counter-suffixed on the off chance
/// something else claimed the name mid-run.
pub fn resolve_destination(output_dir: &Path, name: &DestinationName) -> Result<ResolvedDestination> {
    let base = output_dir.join(name.relative_path());

    if base.exists() {
        return Ok(ResolvedDestination::AlreadyExists(base));
    }

    Ok(ResolvedDestination::Fresh(next_free_path(base)?))
}

/// Append a zero-padded 3-digit counter before the extension until the
/// path is free.
fn next_free_path(base: PathBuf) -> Result<PathBuf> {
    if !base.exists() {
        return Ok(base);
    }

    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidDestination(base.display().to_string()))?
        .to_string();
    let ext = base
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    let parent = base.parent().map(|p| p.to_path_buf()).unwrap_or_default();

    for counter in 1..1000 {
        let candidate = parent.join(format!("{}_{:03}{}", stem, counter, ext));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::InvalidDestination(format!(
        "No free counter suffix for {}",
        base.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn meta(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32, w: u32, hh: u32) -> Metadata {
        Metadata {
            taken_at: NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_micro_opt(h, mi, s, us)
                .unwrap(),
            width: w,
            height: hh,
        }
    }

    #[test]
    fn test_destination_name_pattern() {
        let name = destination_name(&meta(2023, 6, 15, 10, 0, 0, 0, 640, 480), "a1b2c3d4", "jpg");
        assert_eq!(name.year, "2023");
        assert_eq!(name.month, "June");
        assert_eq!(name.filename, "2023-06-15_10.00.00.0000_640x480_a1b2c3d4.jpg");
        assert_eq!(
            name.relative_path(),
            Path::new("2023/June/2023-06-15_10.00.00.0000_640x480_a1b2c3d4.jpg")
        );
    }

    #[test]
    fn test_destination_name_video_scenario() {
        let name = destination_name(
            &meta(2023, 12, 25, 14, 30, 45, 0, 1920, 1080),
            "deadbeef",
            "mp4",
        );
        assert_eq!(name.month, "December");
        assert_eq!(
            name.filename,
            "2023-12-25_14.30.45.0000_1920x1080_deadbeef.mp4"
        );
    }

    #[test]
    fn test_microseconds_truncated_to_four_digits() {
        let name = destination_name(&meta(2024, 1, 2, 3, 4, 5, 987_654, 10, 20), "00000000", "png");
        assert!(name.filename.starts_with("2024-01-02_03.04.05.9876_"));

        // Small microsecond values stay zero-padded
        let name = destination_name(&meta(2024, 1, 2, 3, 4, 5, 42, 10, 20), "00000000", "png");
        assert!(name.filename.starts_with("2024-01-02_03.04.05.0000_"));
    }

    #[test]
    fn test_resolve_destination_reports_duplicate() {
        let dir = TempDir::new().unwrap();
        let name = destination_name(&meta(2023, 6, 15, 10, 0, 0, 0, 640, 480), "a1b2c3d4", "jpg");

        let resolved = resolve_destination(dir.path(), &name).unwrap();
        let fresh = match resolved {
            ResolvedDestination::Fresh(p) => p,
            other => panic!("expected fresh path, got {:?}", other),
        };

        fs::create_dir_all(fresh.parent().unwrap()).unwrap();
        fs::write(&fresh, b"content").unwrap();

        let resolved = resolve_destination(dir.path(), &name).unwrap();
        assert_eq!(resolved, ResolvedDestination::AlreadyExists(fresh));
    }

    #[test]
    fn test_next_free_path_counter_suffix() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("2023-06-15_10.00.00.0000_640x480_a1b2c3d4.jpg");
        fs::write(&base, b"x").unwrap();
        fs::write(
            dir.path()
                .join("2023-06-15_10.00.00.0000_640x480_a1b2c3d4_001.jpg"),
            b"x",
        )
        .unwrap();

        let free = next_free_path(base).unwrap();
        assert_eq!(
            free.file_name().unwrap().to_str().unwrap(),
            "2023-06-15_10.00.00.0000_640x480_a1b2c3d4_002.jpg"
        );
    }
}
