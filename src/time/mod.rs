//! Capture date resolution
//!
//! Photos are dated by their EXIF `DateTimeOriginal` field. When that is
//! missing, malformed, or the file is not a photo, the file system
//! modification time is used instead.

pub mod exif;

use crate::config::{Config, extension_in};
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Source of the resolved timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// EXIF `DateTimeOriginal`
    Exif,
    /// File system modification time
    FileSystem,
}

/// Best-known capture time of a media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    pub timestamp: NaiveDateTime,
    pub source: DateSource,
}

impl ResolvedDate {
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Four-digit folder name for this date's year
    pub fn year_bucket(&self) -> String {
        year_bucket(self.year())
    }
}

/// Format a year as the zero-padded four-digit bucket name
pub fn year_bucket(year: i32) -> String {
    format!("{:04}", year)
}

/// Picks a capture date for each file according to the photo allow-list
#[derive(Debug, Clone)]
pub struct DateResolver {
    photo_extensions: Vec<String>,
}

impl DateResolver {
    pub fn new<I, S>(photo_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            photo_extensions: photo_extensions
                .into_iter()
                .map(|e| e.as_ref().to_string())
                .collect(),
        }
    }

    /// Share the photo allow-list of `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            photo_extensions: config.photo_extensions.clone(),
        }
    }

    /// Resolve the capture date of `path`.
    ///
    /// Metadata problems never surface here; the only error is failing to
    /// read the modification time of the file itself.
    pub fn resolve(&self, path: &Path, extension: &str) -> Result<ResolvedDate> {
        if extension_in(&self.photo_extensions, extension) {
            match exif::read_capture_time(path) {
                Ok(Some(raw)) => match exif::parse_capture_time(&raw) {
                    Some(timestamp) => {
                        debug!(?path, %timestamp, "Resolved date from EXIF");
                        return Ok(ResolvedDate {
                            timestamp,
                            source: DateSource::Exif,
                        });
                    }
                    None => debug!(?path, %raw, "Unparseable EXIF capture time"),
                },
                Ok(None) => debug!(?path, "No EXIF capture time"),
                Err(e) => debug!(?path, error = %e, "EXIF extraction failed"),
            }
        }

        let timestamp = modified_time(path)?;
        debug!(?path, %timestamp, "Using file system modification time");
        Ok(ResolvedDate {
            timestamp,
            source: DateSource::FileSystem,
        })
    }
}

/// Modification time of `path` in local time
fn modified_time(path: &Path) -> Result<NaiveDateTime> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| Error::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
    let local: DateTime<Local> = modified.into();
    Ok(local.naive_local())
}
