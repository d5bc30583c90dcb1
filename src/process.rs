//! Main file processor
//!
//! Drives one organizing run:
//! - Scanning the source directory
//! - Fingerprinting files and dropping duplicates
//! - Resolving capture dates
//! - Moving files into year folders under the destination

use crate::config::Config;
use crate::dedup::{DuplicateCheck, DuplicateTracker};
use crate::error::Result;
use crate::hash::compute_fingerprint;
use crate::placement::{Placement, PlacementPlanner};
use crate::scan::{MediaFile, scan_media_files};
use crate::time::{DateResolver, ResolvedDate};
use crate::transfer::move_file;
use std::fmt;
use std::path::PathBuf;
use tracing::{Level, debug, info, span, warn};

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path (moved, planned, or attempted)
    pub destination: Option<PathBuf>,
    /// Canonical source path when the file is a duplicate
    pub duplicate_of: Option<PathBuf>,
    /// Resolved capture date
    pub date: Option<ResolvedDate>,
    /// Whether the destination name carries a `_N` suffix
    pub renamed: bool,
    /// Processing status
    pub status: ProcessingStatus,
    /// Error message (if unreadable or failed)
    pub error: Option<String>,
}

impl FileResult {
    fn new(source: PathBuf, status: ProcessingStatus) -> Self {
        Self {
            source,
            destination: None,
            duplicate_of: None,
            date: None,
            renamed: false,
            status,
            error: None,
        }
    }
}

/// Status of file processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// File was moved into its year folder
    Moved,
    /// Content already seen earlier in this run; file left in place
    Duplicate,
    /// File could not be read; skipped
    Unreadable,
    /// Placement or move failed; file left in place
    Failed,
    /// Dry run - would have been moved
    DryRun,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcessingStatus::Moved => "moved",
            ProcessingStatus::Duplicate => "duplicate",
            ProcessingStatus::Unreadable => "skipped-unreadable",
            ProcessingStatus::Failed => "failed",
            ProcessingStatus::DryRun => "dry-run",
        };
        f.write_str(label)
    }
}

/// Processing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files: usize,
    pub moved: usize,
    pub duplicates: usize,
    pub unreadable: usize,
    pub failed: usize,
    pub planned: usize,
    /// Files filtered out as hidden or unsupported
    pub ignored: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, status: ProcessingStatus) {
        match status {
            ProcessingStatus::Moved => self.moved += 1,
            ProcessingStatus::Duplicate => self.duplicates += 1,
            ProcessingStatus::Unreadable => self.unreadable += 1,
            ProcessingStatus::Failed => self.failed += 1,
            ProcessingStatus::DryRun => self.planned += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Moved: {}, Duplicates: {}, Unreadable: {}, Failed: {}, Planned: {}, Ignored: {}",
            self.total_files,
            self.moved,
            self.duplicates,
            self.unreadable,
            self.failed,
            self.planned,
            self.ignored
        )
    }
}

/// Main processor for organizing media files
pub struct Processor {
    config: Config,
    resolver: DateResolver,
    stats: ProcessingStats,
}

impl Processor {
    /// Create a new processor with the given configuration.
    ///
    /// Fails before touching any file when either root is unusable.
    pub fn new(mut config: Config) -> Result<Self> {
        config.validate()?;
        config.normalize();
        config.source_dir = config.source_dir.canonicalize()?;
        config.dest_dir = config.dest_dir.canonicalize()?;

        let resolver = DateResolver::from_config(&config);
        Ok(Self {
            config,
            resolver,
            stats: ProcessingStats::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the processing pipeline once over the source directory
    pub fn run(&mut self) -> Result<Vec<FileResult>> {
        let _span = span!(Level::INFO, "processor_run").entered();

        info!(source = %self.config.source_dir.display(), "Scanning source directory...");
        let scan = scan_media_files(&self.config.source_dir, &self.config);
        info!(count = scan.files.len(), ignored = scan.ignored, "Found media files");

        self.stats = ProcessingStats {
            total_files: scan.files.len(),
            ignored: scan.ignored,
            ..ProcessingStats::new()
        };

        // Registry and planner live for this run only
        let mut tracker = DuplicateTracker::new();
        let mut planner = if self.config.dry_run {
            PlacementPlanner::preview(&self.config.dest_dir)
        } else {
            PlacementPlanner::new(&self.config.dest_dir)
        };

        let mut results = Vec::with_capacity(scan.files.len());
        for file in &scan.files {
            let _file_span = span!(Level::DEBUG, "process_file", path = ?file.path).entered();
            let result = self.process_file(file, &mut tracker, &mut planner);
            self.stats.record(result.status);
            results.push(result);
        }

        info!(distinct = tracker.len(), "{}", self.stats.summary());
        Ok(results)
    }

    /// Process one file; every per-file error ends up in the returned result
    fn process_file(
        &self,
        file: &MediaFile,
        tracker: &mut DuplicateTracker,
        planner: &mut PlacementPlanner,
    ) -> FileResult {
        let path = &file.path;

        let fingerprint = match compute_fingerprint(path) {
            Ok(fp) => fp,
            Err(e) => {
                warn!(?path, error = %e, "skipped-unreadable");
                return FileResult {
                    error: Some(e.to_string()),
                    ..FileResult::new(path.clone(), ProcessingStatus::Unreadable)
                };
            }
        };

        if let DuplicateCheck::Duplicate(original) = tracker.check_and_register(fingerprint, path) {
            info!(source = ?path, original = ?original, "duplicate");
            return FileResult {
                duplicate_of: Some(original),
                ..FileResult::new(path.clone(), ProcessingStatus::Duplicate)
            };
        }

        let date = match self.resolver.resolve(path, &file.extension) {
            Ok(date) => date,
            Err(e) => {
                warn!(?path, error = %e, "skipped-unreadable");
                return FileResult {
                    error: Some(e.to_string()),
                    ..FileResult::new(path.clone(), ProcessingStatus::Unreadable)
                };
            }
        };

        let Some(filename) = path.file_name() else {
            // Unreachable for walked files, which always have a name
            return FileResult {
                error: Some("path has no file name".into()),
                ..FileResult::new(path.clone(), ProcessingStatus::Failed)
            };
        };

        let Placement {
            destination,
            renamed,
        } = match planner.plan(date.year(), filename) {
            Ok(placement) => placement,
            Err(e) => {
                warn!(?path, error = %e, "Failed to prepare destination");
                return FileResult {
                    date: Some(date),
                    error: Some(e.to_string()),
                    ..FileResult::new(path.clone(), ProcessingStatus::Failed)
                };
            }
        };

        if self.config.dry_run {
            info!(
                source = ?path,
                destination = ?destination,
                date_source = ?date.source,
                "Would move file"
            );
            return FileResult {
                destination: Some(destination),
                date: Some(date),
                renamed,
                ..FileResult::new(path.clone(), ProcessingStatus::DryRun)
            };
        }

        if let Err(e) = move_file(path, &destination) {
            warn!(?path, ?destination, error = %e, "Failed to move file");
            return FileResult {
                destination: Some(destination),
                date: Some(date),
                renamed,
                error: Some(e.to_string()),
                ..FileResult::new(path.clone(), ProcessingStatus::Failed)
            };
        }

        if renamed {
            debug!(?path, ?destination, "Destination renamed to avoid overwrite");
        }
        info!(
            source = ?path,
            destination = ?destination,
            date_source = ?date.source,
            timestamp = %date.timestamp,
            "moved"
        );

        FileResult {
            destination: Some(destination),
            date: Some(date),
            renamed,
            ..FileResult::new(path.clone(), ProcessingStatus::Moved)
        }
    }

    /// Get processing statistics of the last run
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}
