//! Media Sorter - photo and video deduplication into year folders
//!
//! A CLI tool that moves media files into per-year folders, using the
//! EXIF capture date for photos and the file modification time otherwise.

use anyhow::Result;
use clap::Parser;
use media_sorter::{Cli, Config, FileResult, ProcessingStatus, Processor};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Colored summary output for the command line.

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    pub fn print_title(title: &str) {
        let padding = 60usize.saturating_sub(title.len()) / 2;
        let _ = stdout().execute(Print(" ".repeat(padding)));
        let _ = stdout().execute(Print(style(title).bold()));
        let _ = stdout().execute(Print("\n\n"));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a labelled counter
    pub fn print_stat(key: &str, value: usize, color: Color) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(key).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(style(value.to_string()).with(color).bold()));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print one processed file
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, detail: &str) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(status_icon).with(status_color).bold()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(source).italic()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(detail).with(CliTheme::HINT)));
        let _ = stdout().execute(Print("\n"));
    }

    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.print_sample_config {
        print!("{}", Config::sample_config());
        return;
    }

    let guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            cli_output::print_error(&format!("Failed to set up logging: {:#}", e));
            std::process::exit(1);
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), "Media Sorter starting");

    if let Err(e) = run(&cli) {
        error!(error = %e, "Run aborted");
        cli_output::print_error(&format!("{:#}", e));
        // Flush the file writer before exiting
        drop(guard);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    let mut processor = Processor::new(config)?;
    let results = processor.run()?;
    print_summary(&processor, &results, processor.config().verbose);

    Ok(())
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config {
        Some(ref path) => {
            info!(config_file = %path.display(), "Loading configuration from file");
            cli.merge_with_config(Config::load_from_file(path)?)
        }
        None => cli.to_config(),
    };
    Ok(config)
}

fn print_summary(processor: &Processor, results: &[FileResult], verbose: bool) {
    use cli_output::*;

    let stats = processor.stats();

    print_separator();
    print_title("Processing complete");
    print_stat("Moved", stats.moved, CliTheme::SUCCESS);
    print_stat("Duplicates", stats.duplicates, CliTheme::ACCENT);
    print_stat("Unreadable", stats.unreadable, CliTheme::WARNING);
    print_stat("Failed", stats.failed, CliTheme::ERROR);
    if processor.config().dry_run {
        print_stat("Planned", stats.planned, CliTheme::ACCENT);
    }
    print_stat("Ignored", stats.ignored, CliTheme::HINT);
    print_blank();

    if verbose {
        print_separator();
        for result in results {
            print_file_result(result);
        }
        print_blank();
    }

    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.status == ProcessingStatus::Failed)
        .collect();
    if !failed.is_empty() {
        print_separator();
        print_error(&format!("{} files could not be moved", failed.len()));
        for result in failed {
            print_file_result(result);
        }
    }

    if processor.config().dry_run {
        print_separator();
        print_warning("Dry run: no files were moved");
    }
}

fn print_file_result(result: &FileResult) {
    use cli_output::*;

    let source = result.source.display().to_string();
    let destination = result
        .destination
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let error = result.error.as_deref().unwrap_or("unknown error");

    match result.status {
        ProcessingStatus::Moved => {
            print_result("✓", CliTheme::SUCCESS, &source, &format!("→ {}", destination))
        }
        ProcessingStatus::DryRun => {
            print_result("~", CliTheme::ACCENT, &source, &format!("→ {}", destination))
        }
        ProcessingStatus::Duplicate => {
            let original = result
                .duplicate_of
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            print_result(
                "≡",
                CliTheme::ACCENT,
                &source,
                &format!("duplicate of {}", original),
            )
        }
        ProcessingStatus::Unreadable => print_result("⊘", CliTheme::WARNING, &source, error),
        ProcessingStatus::Failed => print_result("✗", CliTheme::ERROR, &source, error),
    }
}

/// Setup logging: console always, plus an optional log file
fn setup_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    let Some(ref log_path) = cli.log_file else {
        subscriber.init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(Some(guard))
}
