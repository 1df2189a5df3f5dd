//! Batch processing pipeline
//!
//! Single-pass, strictly sequential: scan -> validate -> resolve metadata
//! -> sort by capture time -> optional cutoff filter -> relocate. Per-file
//! failures are recovered at the file boundary; only input-level errors
//! abort the run.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hash::content_hash;
use crate::meta::{self, Metadata};
use crate::naming::{ResolvedDestination, destination_name, resolve_destination};
use crate::scan::{MediaFile, scan_media_files};
use crate::validate::check_media_file;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Outcome of relocating a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Content duplicated into the destination tree, source preserved
    Copied,
    /// Source moved into the destination tree
    Moved,
    /// Exact destination already existed; nothing written
    SkippedExisting,
    /// Dry run: destination computed and reported, nothing performed
    Preview,
    /// Relocation failed after successful metadata resolution
    Failed,
}

/// Per-file record emitted by a run, in relocation order
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub taken_at: NaiveDateTime,
    pub outcome: Outcome,
}

/// Running tally for one batch; process-scoped, discarded at end of run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub attempted: usize,
    pub succeeded: usize,
}

/// Single-pass batch processor composing scanner, validity checker,
/// metadata resolver, hasher and name builder.
pub struct Processor {
    config: Config,
    stats: RunStats,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Run the whole pipeline, returning one report per relocated file.
    pub fn run(&mut self) -> Result<Vec<FileReport>> {
        if !self.config.input_dir.is_dir() {
            return Err(Error::NotADirectory(self.config.input_dir.clone()));
        }

        println!("Scanning media files and extracting metadata...");
        let mut entries = self.collect_with_metadata();

        if entries.is_empty() {
            println!(
                "No supported image or video files with valid metadata found in directory tree"
            );
            return Ok(Vec::new());
        }

        // Chronological relocation order, independent of traversal order.
        // Required for the start-cutoff filter to behave correctly.
        entries.sort_by_key(|(_, meta)| meta.taken_at);

        if let Some(cutoff) = self.config.start_from {
            entries.retain(|(_, meta)| meta.taken_at >= cutoff);
            println!(
                "Found {} files from {} onwards (sorted by creation time)",
                entries.len(),
                cutoff.format("%Y/%m")
            );
        } else {
            println!(
                "Processing all {} files sorted by creation time",
                entries.len()
            );
        }

        if entries.is_empty() {
            println!("No files to process after filtering");
            return Ok(Vec::new());
        }

        if !self.config.dry_run && !self.config.output_dir.exists() {
            fs::create_dir_all(&self.config.output_dir)?;
            println!(
                "Created output directory: {}",
                self.config.output_dir.display()
            );
        }

        println!("Processing media files...");
        let mut reports = Vec::with_capacity(entries.len());
        for (media, metadata) in &entries {
            self.stats.attempted += 1;
            let report = self.relocate_file(media, metadata);
            if report.outcome != Outcome::Failed {
                self.stats.succeeded += 1;
            }
            reports.push(report);
        }

        println!(
            "\nProcessed {}/{} files successfully",
            self.stats.succeeded, self.stats.attempted
        );
        info!(
            attempted = self.stats.attempted,
            succeeded = self.stats.succeeded,
            "Batch complete"
        );

        Ok(reports)
    }

    /// Scan the input tree and resolve metadata for every candidate.
    /// Candidates that fail validation or resolution are reported and
    /// excluded; they never enter the relocation tally.
    fn collect_with_metadata(&self) -> Vec<(MediaFile, Metadata)> {
        let mut entries = Vec::new();

        for media in scan_media_files(&self.config.input_dir) {
            let display_name = file_name(&media.path);

            let (valid, reason) = check_media_file(&media.path);
            if !valid {
                let reason = reason.unwrap_or_else(|| "unknown".to_string());
                warn!(path = ?media.path, reason, "Rejected during validation");
                println!("Skipping {} - {}", display_name, reason);
                continue;
            }

            match meta::resolve(&media) {
                Ok(metadata) => {
                    debug!(
                        path = ?media.path,
                        taken_at = %metadata.taken_at,
                        width = metadata.width,
                        height = metadata.height,
                        "Resolved metadata"
                    );
                    entries.push((media, metadata));
                }
                Err(e) => {
                    warn!(path = ?media.path, error = %e, "Metadata resolution failed");
                    println!("Skipping {} - could not extract metadata", display_name);
                }
            }
        }

        entries
    }

    /// Relocate one file to its computed destination. The decision logic
    /// up through destination-path computation is identical in dry-run
    /// and live mode so the preview is faithful.
    fn relocate_file(&self, media: &MediaFile, metadata: &Metadata) -> FileReport {
        let display_name = file_name(&media.path);
        let hash = content_hash(&media.path, self.config.hash_prefix_limit);
        let name = destination_name(metadata, &hash, &media.ext);
        let operation = if self.config.in_place { "move" } else { "copy" };

        let resolved = match resolve_destination(&self.config.output_dir, &name) {
            Ok(r) => r,
            Err(e) => {
                error!(path = ?media.path, error = %e, "Destination resolution failed");
                println!("Error processing {}: {}", display_name, e);
                return FileReport {
                    source: media.path.clone(),
                    destination: self.config.output_dir.join(name.relative_path()),
                    taken_at: metadata.taken_at,
                    outcome: Outcome::Failed,
                };
            }
        };

        match resolved {
            ResolvedDestination::AlreadyExists(dest) => {
                let rel = self.relative_to_output(&dest);
                if self.config.dry_run {
                    println!("Would skip (already exists): {} -> {}", display_name, rel);
                } else {
                    println!("Skipped (already exists): {} -> {}", display_name, rel);
                }
                FileReport {
                    source: media.path.clone(),
                    destination: dest,
                    taken_at: metadata.taken_at,
                    outcome: Outcome::SkippedExisting,
                }
            }
            ResolvedDestination::Fresh(dest) => {
                let rel = self.relative_to_output(&dest);

                if self.config.dry_run {
                    println!("Would {}: {} -> {}", operation, display_name, rel);
                    return FileReport {
                        source: media.path.clone(),
                        destination: dest,
                        taken_at: metadata.taken_at,
                        outcome: Outcome::Preview,
                    };
                }

                match self.perform_relocation(&media.path, &dest) {
                    Ok(outcome) => {
                        let verb = match outcome {
                            Outcome::Moved => "Moved",
                            _ => "Copied",
                        };
                        println!("{}: {} -> {}", verb, display_name, rel);
                        FileReport {
                            source: media.path.clone(),
                            destination: dest,
                            taken_at: metadata.taken_at,
                            outcome,
                        }
                    }
                    Err(e) => {
                        let gerund = if self.config.in_place {
                            "moving"
                        } else {
                            "copying"
                        };
                        error!(path = ?media.path, ?dest, error = %e, "Relocation failed");
                        println!("Error {} {}: {}", gerund, display_name, e);
                        FileReport {
                            source: media.path.clone(),
                            destination: dest,
                            taken_at: metadata.taken_at,
                            outcome: Outcome::Failed,
                        }
                    }
                }
            }
        }
    }

    /// Copy (preserving the source) or move according to mode, creating
    /// destination directories as needed and carrying the source mtime
    /// over to the destination.
    fn perform_relocation(&self, source: &Path, dest: &Path) -> Result<Outcome> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.config.in_place {
            // Rename first; fall back to copy+delete across filesystems
            if fs::rename(source, dest).is_err() {
                fs::copy(source, dest)?;
                preserve_mtime(source, dest);
                fs::remove_file(source)?;
            }
            Ok(Outcome::Moved)
        } else {
            fs::copy(source, dest)?;
            preserve_mtime(source, dest);
            Ok(Outcome::Copied)
        }
    }

    fn relative_to_output(&self, dest: &Path) -> String {
        dest.strip_prefix(&self.config.output_dir)
            .unwrap_or(dest)
            .display()
            .to_string()
    }
}

/// Source modification time carries over to the relocated file
fn preserve_mtime(source: &Path, dest: &Path) {
    if let Ok(metadata) = fs::metadata(source)
        && let Ok(mtime) = metadata.modified()
    {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
