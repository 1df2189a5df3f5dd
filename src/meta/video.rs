//! Video metadata extraction via ffprobe
//!
//! The prober is invoked once per file with fully captured output and no
//! retry. A non-zero exit status or malformed JSON fails resolution for
//! that file only. No timeout is enforced on the subprocess call.

use crate::error::{Error, Result};
use crate::meta::{Metadata, modified_time};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

/// Container tag keys to try for the capture date, in priority order
const DATE_TAG_KEYS: &[&str] = &["creation_time", "date", "datetime"];

#[derive(Deserialize)]
struct FfprobeReport {
    streams: Option<Vec<FfprobeStream>>,
    format: Option<FfprobeFormat>,
}

#[derive(Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct FfprobeFormat {
    tags: Option<HashMap<String, String>>,
}

/// Resolve metadata for a video file.
pub fn resolve_video(path: &Path) -> Result<Metadata> {
    let report = probe(path)?;

    let (width, height) = video_stream_dimensions(&report).map_err(|message| Error::VideoProbe {
        path: path.to_path_buf(),
        message,
    })?;

    let taken_at = match container_capture_time(&report) {
        Some(time) => {
            debug!(?path, %time, "Extracted capture time from container tags");
            time
        }
        None => {
            trace!(?path, "No usable date tag in container metadata");
            modified_time(path)?
        }
    };

    Ok(Metadata {
        taken_at,
        width,
        height,
    })
}

/// Run ffprobe and deserialize its JSON report.
fn probe(path: &Path) -> Result<FfprobeReport> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| Error::VideoProbe {
            path: path.to_path_buf(),
            message: format!("Failed to execute ffprobe: {}", e),
        })?;

    if !output.status.success() {
        return Err(Error::VideoProbe {
            path: path.to_path_buf(),
            message: format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|e| Error::VideoProbe {
        path: path.to_path_buf(),
        message: format!("Failed to parse ffprobe JSON: {}", e),
    })
}

/// Pull dimensions from the first stream declaring itself video.
///
/// Resolution fails outright when no such stream exists or it lacks a
/// positive width and height; a missing capture date never does.
fn video_stream_dimensions(report: &FfprobeReport) -> std::result::Result<(u32, u32), String> {
    let video_stream = report
        .streams
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| "No video stream found".to_string())?;

    match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err("Could not determine video dimensions".to_string()),
    }
}

/// Pick the capture time from container-level tags, first matching key
/// wins.
fn container_capture_time(report: &FfprobeReport) -> Option<NaiveDateTime> {
    let tags = report.format.as_ref()?.tags.as_ref()?;

    for key in DATE_TAG_KEYS {
        if let Some(value) = tags.get(*key)
            && let Some(dt) = parse_tag_datetime(value)
        {
            return Some(dt);
        }
    }
    None
}

/// Parse an ISO-like tag value, truncated to whole seconds.
///
/// `T`-separated values have fractional seconds dropped and a trailing
/// `Z` stripped; the remainder must match `YYYY-MM-DD HH:MM:SS`.
fn parse_tag_datetime(raw: &str) -> Option<NaiveDateTime> {
    let mut value = raw.trim().to_string();

    if value.contains('T') {
        value = value.replace('T', " ");
        value = value.split('.').next().unwrap_or_default().to_string();
        if let Some(stripped) = value.strip_suffix('Z') {
            value = stripped.to_string();
        }
    }

    NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").ok()
}
