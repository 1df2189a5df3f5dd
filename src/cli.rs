//! CLI argument parsing with clap

use crate::config::{Config, parse_cutoff};
use crate::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Copy and rename photos and videos based on metadata to a new directory
///
/// Recursively finds photos and videos under the input directory and
/// relocates them into year/month folders, renamed from capture metadata
/// as YYYY-MM-DD_HH.MM.SS.ssss_WIDTHxHEIGHT_HASH.
#[derive(Parser, Debug)]
#[command(name = "media-renamer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input directory path containing photos and videos
    pub input_path: PathBuf,

    /// Output directory path (defaults to <input_path>_renamed)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be copied/renamed without actually doing it
    #[arg(long)]
    pub dry_run: bool,

    /// Start copying from this year/month onwards (format: YYYY/MM).
    /// Files are sorted by creation time and copying starts from this date.
    #[arg(long, value_name = "YYYY/MM")]
    pub from_date: Option<String>,

    /// Move files within the same directory structure into year/month
    /// folders instead of copying to a new location
    #[arg(long)]
    pub in_place: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into a runtime configuration.
    ///
    /// In-place mode pins the output to the input tree; an explicit
    /// `--output` is ignored in that case (the caller warns about it).
    pub fn to_config(&self) -> Result<Config> {
        let start_from = self.from_date.as_deref().map(parse_cutoff).transpose()?;

        let output_dir = if self.in_place {
            self.input_path.clone()
        } else {
            self.output
                .clone()
                .unwrap_or_else(|| default_output_dir(&self.input_path))
        };

        Ok(Config {
            input_dir: self.input_path.clone(),
            output_dir,
            dry_run: self.dry_run,
            in_place: self.in_place,
            start_from,
            verbose: self.verbose,
            hash_prefix_limit: None,
        })
    }
}

/// Default destination: the input path with a `_renamed` suffix.
fn default_output_dir(input: &Path) -> PathBuf {
    let trimmed = input.to_string_lossy();
    PathBuf::from(format!("{}_renamed", trimmed.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_appends_suffix() {
        assert_eq!(
            default_output_dir(Path::new("/photos/albums")),
            PathBuf::from("/photos/albums_renamed")
        );
        assert_eq!(
            default_output_dir(Path::new("/photos/albums/")),
            PathBuf::from("/photos/albums_renamed")
        );
    }

    #[test]
    fn test_to_config_defaults() {
        let cli = Cli::parse_from(["media-renamer", "/photos"]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/photos"));
        assert_eq!(config.output_dir, PathBuf::from("/photos_renamed"));
        assert!(!config.dry_run);
        assert!(!config.in_place);
        assert!(!config.verbose);
        assert!(config.start_from.is_none());
    }

    #[test]
    fn test_verbose_flag_reaches_config() {
        let cli = Cli::parse_from(["media-renamer", "/photos", "--verbose"]);
        let config = cli.to_config().unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn test_in_place_ignores_explicit_output() {
        let cli = Cli::parse_from([
            "media-renamer",
            "/photos",
            "--in-place",
            "--output",
            "/elsewhere",
        ]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/photos"));
        assert!(config.in_place);
    }

    #[test]
    fn test_from_date_parsed_and_validated() {
        let cli = Cli::parse_from(["media-renamer", "/photos", "--from-date", "2023/06"]);
        let config = cli.to_config().unwrap();
        assert!(config.start_from.is_some());

        let cli = Cli::parse_from(["media-renamer", "/photos", "--from-date", "June 2023"]);
        assert!(cli.to_config().is_err());
    }
}
