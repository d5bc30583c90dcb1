//! CLI argument parsing with clap

use crate::config::{Config, normalize_extension};
use clap::Parser;
use std::path::PathBuf;

/// Media Sorter - deduplicate photos and videos into year folders
///
/// Moves every photo and video under the source directory into
/// DEST/YYYY/, using the EXIF capture date for photos and the file
/// modification time otherwise. Byte-identical copies are reported
/// and left in place.
#[derive(Parser, Debug)]
#[command(name = "media-sorter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Source directory with unsorted media
    #[arg(short, long, env = "MEDIA_SORTER_SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination directory for the year folders
    #[arg(short, long, env = "MEDIA_SORTER_DEST")]
    pub dest: Option<PathBuf>,

    /// Photo extensions, comma separated (e.g. jpg,jpeg,png)
    #[arg(long, value_delimiter = ',')]
    pub photo_ext: Option<Vec<String>>,

    /// Video extensions, comma separated (e.g. mp4,mov)
    #[arg(long, value_delimiter = ',')]
    pub video_ext: Option<Vec<String>>,

    /// Directory names or absolute paths to skip while scanning
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<PathBuf>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the log file as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_sample_config: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(ref dest) = self.dest {
            config.dest_dir = dest.clone();
        }
        if let Some(ref exts) = self.photo_ext {
            config.photo_extensions = exts.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(ref exts) = self.video_ext {
            config.video_extensions = exts.iter().map(|e| normalize_extension(e)).collect();
        }
        if !self.exclude.is_empty() {
            config.exclude_dirs = self.exclude.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config.normalize();
        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
