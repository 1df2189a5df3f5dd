//! Error types for the media renamer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media renamer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media renamer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to decode image {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    #[error("Failed to probe video metadata from {path}: {message}")]
    VideoProbe { path: PathBuf, message: String },

    #[error("Invalid year/month format: {input}. Expected format: YYYY/MM")]
    InvalidCutoff { input: String },

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid destination path: {0}")]
    InvalidDestination(String),
}
