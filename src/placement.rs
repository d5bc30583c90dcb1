//! Year-bucketed destination planning with collision-free names

use crate::error::Result;
use crate::time::year_bucket;
use crate::transfer::ensure_dir;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a file will be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub destination: PathBuf,
    /// True when a `_N` suffix was needed to avoid an existing file
    pub renamed: bool,
}

/// Plans destinations under `dest_root/YYYY/`.
///
/// Every probe checks the filesystem again. In preview mode nothing is
/// created; planned paths are remembered instead so later files in the same
/// preview see them as taken.
#[derive(Debug)]
pub struct PlacementPlanner {
    dest_root: PathBuf,
    preview: bool,
    reserved: HashSet<PathBuf>,
}

impl PlacementPlanner {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
            preview: false,
            reserved: HashSet::new(),
        }
    }

    /// Planner for dry runs: no directories are created
    pub fn preview(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            preview: true,
            ..Self::new(dest_root)
        }
    }

    /// Pick a destination for `filename` in the bucket for `year`
    pub fn plan(&mut self, year: i32, filename: &OsStr) -> Result<Placement> {
        let target_dir = self.dest_root.join(year_bucket(year));
        if !self.preview {
            ensure_dir(&target_dir)?;
        }

        let candidate = target_dir.join(filename);
        let placement = if !self.is_taken(&candidate) {
            Placement {
                destination: candidate,
                renamed: false,
            }
        } else {
            let destination = self.first_free_suffix(&target_dir, filename);
            debug!(?candidate, ?destination, "Name taken, using suffixed name");
            Placement {
                destination,
                renamed: true,
            }
        };

        if self.preview {
            self.reserved.insert(placement.destination.clone());
        }
        Ok(placement)
    }

    fn is_taken(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        path.symlink_metadata().is_ok() || self.reserved.contains(path)
    }

    fn first_free_suffix(&self, dir: &Path, filename: &OsStr) -> PathBuf {
        let (stem, ext) = split_filename(filename);
        let mut n: u64 = 1;
        loop {
            let candidate = dir.join(suffixed_name(&stem, ext.as_deref(), n));
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Split a filename into stem and extension the way `Path` does
fn split_filename(filename: &OsStr) -> (OsString, Option<OsString>) {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| filename.to_os_string());
    let ext = path.extension().map(OsStr::to_os_string);
    (stem, ext)
}

fn suffixed_name(stem: &OsStr, ext: Option<&OsStr>, n: u64) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("_{}", n));
    if let Some(ext) = ext {
        name.push(".");
        name.push(ext);
    }
    name
}
