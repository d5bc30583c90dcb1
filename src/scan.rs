//! Source tree traversal and eligibility filtering

use crate::config::{Config, is_hidden_or_sidecar, normalize_extension};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// A media file discovered under the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Lowercase extension with leading dot, e.g. `.jpg`
    pub extension: String,
}

impl MediaFile {
    /// Build a `MediaFile` when the path passes the hidden-file and
    /// allow-list filters
    pub fn from_path(path: &Path, config: &Config) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        if is_hidden_or_sidecar(&name) {
            trace!(?path, "Skipping hidden or sidecar file");
            return None;
        }

        let ext = path.extension().and_then(|e| e.to_str())?;
        if !config.is_supported(ext) {
            trace!(?path, "Skipping unsupported extension");
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            extension: normalize_extension(ext),
        })
    }
}

/// Files found by a scan
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Eligible files in traversal order
    pub files: Vec<MediaFile>,
    /// Regular files that were filtered out
    pub ignored: usize,
}

/// Walk `root` and collect eligible media files.
///
/// Entries are visited in file-name order, so the result is stable across
/// runs over the same tree. Symlinks are not followed. A destination
/// directory nested under `root` is never entered.
pub fn scan_media_files(root: &Path, config: &Config) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !(is_destination(e.path(), &config.dest_dir)
                    || is_excluded_dir(e.path(), &config.exclude_dirs))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match MediaFile::from_path(entry.path(), config) {
            Some(file) => outcome.files.push(file),
            None => outcome.ignored += 1,
        }
    }

    debug!(
        found = outcome.files.len(),
        ignored = outcome.ignored,
        "Scanned source directory"
    );
    outcome
}

fn is_destination(path: &Path, dest_dir: &Path) -> bool {
    if !dest_dir.as_os_str().is_empty() && path == dest_dir {
        debug!(?path, "Skipping destination directory");
        return true;
    }
    false
}

/// Check if a path should be excluded based on exclude_dirs configuration
fn is_excluded_dir(path: &Path, exclude_dirs: &[PathBuf]) -> bool {
    for exclude in exclude_dirs {
        if exclude.is_absolute() {
            if path.starts_with(exclude) {
                debug!(?path, ?exclude, "Excluding directory (absolute path match)");
                return true;
            }
        } else if exclude.file_name().is_some() && path.file_name() == exclude.file_name() {
            debug!(?path, ?exclude, "Excluding directory (folder name match)");
            return true;
        }
    }

    false
}
