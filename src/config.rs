//! Configuration types for the media sorter

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// OS-generated sidecar files that are never treated as media
const SIDECAR_NAMES: &[&str] = &["thumbs.db", "desktop.ini", "ehthumbs.db"];

/// Configuration for one organizing run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the unsorted media
    pub source_dir: PathBuf,

    /// Directory that receives the year folders
    pub dest_dir: PathBuf,

    /// Photo extensions; only these are searched for EXIF capture dates
    pub photo_extensions: Vec<String>,

    /// Video extensions
    pub video_extensions: Vec<String>,

    /// Directories to exclude from scanning (absolute paths or folder names)
    pub exclude_dirs: Vec<PathBuf>,

    /// Dry run mode - plan destinations without touching the filesystem
    pub dry_run: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            photo_extensions: vec![".jpg".into(), ".jpeg".into(), ".png".into()],
            video_extensions: vec![".mp4".into(), ".mov".into(), ".avi".into(), ".mkv".into()],
            exclude_dirs: vec![],
            dry_run: false,
            verbose: false,
        }
    }
}

/// Normalize an extension to lowercase with a single leading dot.
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim().trim_start_matches('.').to_lowercase())
}

/// Whether `ext` appears in an extension allow-list, in any spelling
pub fn extension_in(list: &[String], ext: &str) -> bool {
    let ext = normalize_extension(ext);
    list.iter().any(|e| normalize_extension(e) == ext)
}

/// Whether a file name is a hidden file or an OS sidecar artifact
pub fn is_hidden_or_sidecar(file_name: &str) -> bool {
    if file_name.starts_with('.') {
        return true;
    }
    let lower = file_name.to_lowercase();
    SIDECAR_NAMES.iter().any(|s| *s == lower)
}

impl Config {
    /// Create a config for the given roots with default extension lists
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    /// Rewrite both extension lists into their normalized form
    pub fn normalize(&mut self) {
        self.photo_extensions = self
            .photo_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
        self.video_extensions = self
            .video_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
    }

    /// Check if an extension belongs to the photo allow-list
    pub fn is_photo(&self, ext: &str) -> bool {
        extension_in(&self.photo_extensions, ext)
    }

    /// Check if an extension belongs to the video allow-list
    pub fn is_video(&self, ext: &str) -> bool {
        extension_in(&self.video_extensions, ext)
    }

    /// Check if an extension is in the combined allow-list
    pub fn is_supported(&self, ext: &str) -> bool {
        self.is_photo(ext) || self.is_video(ext)
    }

    /// Ensure both roots are usable before any file is touched
    pub fn validate(&self) -> Result<()> {
        for (path, role) in [(&self.source_dir, "source"), (&self.dest_dir, "destination")] {
            if path.as_os_str().is_empty() {
                return Err(Error::Config(format!("{} directory is not configured", role)));
            }
            if !path.exists() {
                return Err(Error::InvalidRoot {
                    path: path.clone(),
                    reason: "does not exist",
                });
            }
            if !path.is_dir() {
                return Err(Error::InvalidRoot {
                    path: path.clone(),
                    reason: "is not a directory",
                });
            }
        }

        let source = self.source_dir.canonicalize()?;
        let dest = self.dest_dir.canonicalize()?;
        if dest == source {
            return Err(Error::Config(format!(
                "destination {} is the same directory as the source",
                dest.display()
            )));
        }
        if dest.starts_with(&source) {
            debug!(
                dest = %dest.display(),
                "Destination is inside source; it is skipped while scanning"
            );
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.normalize();

        Ok(config)
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Media Sorter Configuration File
# This file uses TOML format (https://toml.io)

# Directory with the unsorted photos and videos
source_dir = "/Volumes/Memory/Unsorted"

# Directory that receives one folder per capture year (YYYY/)
# Must exist; when it sits inside source_dir it is skipped while scanning
dest_dir = "/Volumes/Memory/Organized"

# Photo extensions; EXIF DateTimeOriginal is read only for these
photo_extensions = [".jpg", ".jpeg", ".png"]

# Video extensions; filed by modification time
video_extensions = [".mp4", ".mov", ".avi", ".mkv"]

# Directories to exclude from scanning
# Can be absolute paths or folder names (will match any folder with that name)
exclude_dirs = [".thumbnails", "@eaDir"]

# Dry run mode - show what would be done without moving anything
dry_run = false

# Verbose output - list every file outcome in the summary
verbose = false
"#
        .to_string()
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}
