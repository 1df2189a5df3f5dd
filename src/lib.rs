//! Media Renamer - batch photo and video organization by capture metadata
//!
//! This library ingests a directory tree of photo and video files, derives
//! a canonical identity for each (capture timestamp, pixel dimensions,
//! content hash) and relocates every file into a date-partitioned layout
//! with a content-derived filename:
//! - EXIF-based capture time for images, ffprobe container tags for videos
//! - filesystem mtime fallback when no embedded capture time exists
//! - xxHash content fingerprints for filename disambiguation
//! - deterministic, chronological relocation with dry-run and in-place modes

pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod meta;
pub mod naming;
pub mod process;
pub mod scan;
pub mod validate;

pub use cli::Cli;
pub use config::Config;
pub use error::{Error, Result};
pub use meta::Metadata;
pub use process::{FileReport, Outcome, Processor, RunStats};
pub use scan::{MediaFile, MediaKind};
