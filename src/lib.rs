//! Media Sorter - deduplicate photos and videos into year folders
//!
//! This library moves media files from an unsorted tree into
//! `DEST/YYYY/` folders with support for:
//! - EXIF capture dates for photos, modification time otherwise
//! - Content fingerprints (XXH3-128) to drop duplicate copies
//! - Collision-free destination names (`name_1.ext`, `name_2.ext`, ...)
//! - Dry runs

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod hash;
pub mod placement;
pub mod process;
pub mod scan;
pub mod time;
pub mod transfer;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use dedup::{DuplicateCheck, DuplicateTracker};
pub use error::{Error, Result};
pub use hash::{Fingerprint, compute_fingerprint};
pub use placement::{Placement, PlacementPlanner};
pub use process::{FileResult, ProcessingStats, ProcessingStatus, Processor};
pub use scan::{MediaFile, ScanOutcome, scan_media_files};
pub use time::{DateResolver, DateSource, ResolvedDate};
