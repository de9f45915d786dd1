//! Command-line interface for sortdir.
//!
//! Parses arguments, sets up logging, loads the skip-list configuration and
//! runs the organizer with a progress bar and summary.

use crate::config::{ConfigError, SortConfig};
use crate::file_organizer::OrganizeError;
use crate::organizer::{OrganizeReport, Organizer};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Sort the files of a directory into category subdirectories by extension.
///
/// Images keep their .xmp sidecars with them. Subdirectories named after a
/// category are left alone, so running twice is harmless.
#[derive(Parser, Debug)]
#[command(name = "sortdir", author, version, about)]
pub struct Cli {
    /// The directory to organize
    pub dir: PathBuf,

    /// Skip-list configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every decision to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the progress bar and summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Errors surfaced to the user by a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Organize(#[from] OrganizeError),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug with
/// `verbose`. Installing twice is a no-op.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one organization of `cli.dir` and prints the outcome.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use sortdir::cli::{run_cli, Cli};
///
/// let cli = Cli::parse_from(["sortdir", "/path/to/directory"]);
/// match run_cli(&cli) {
///     Ok(report) => println!("Moved {} entries", report.moved.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<OrganizeReport, CliError> {
    let rules = SortConfig::load(cli.config.as_deref())?.compile()?;
    let organizer = Organizer::new(rules);

    if !cli.quiet {
        OutputFormatter::info(&format!("Organizing contents of: {}", cli.dir.display()));
    }

    let pb = OutputFormatter::create_progress_bar(0, cli.quiet);
    let result = organizer.organize_with_progress(&cli.dir, |done, total, name| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
        pb.set_message(name.to_string());
    });
    pb.finish_and_clear();
    let report = result?;

    if !cli.quiet {
        if report.is_empty() {
            OutputFormatter::warning("Nothing to organize.");
        } else {
            OutputFormatter::summary_table(&report);
        }
        OutputFormatter::success("Organization complete!");
    }

    Ok(report)
}
