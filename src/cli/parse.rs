//! CLI parse: clap types for prefsync. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Prefsync CLI - merge a hardened preference baseline into browser profiles
#[derive(Parser, Debug)]
#[command(name = "prefsync")]
#[command(version)]
#[command(about = "Synchronize browser profile preference files with a hardened baseline")]
pub struct Cli {
    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Baseline URL (overrides config)
    #[arg(long, conflicts_with = "from_file")]
    pub url: Option<String>,

    /// Read the baseline from a local file instead of downloading it
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// Directory containing browser profiles
    #[arg(long)]
    pub profiles_root: Option<PathBuf>,

    /// Preference file name inside each profile
    #[arg(long)]
    pub file: Option<String>,

    /// Update every profile without prompting for a selection
    #[arg(long, conflicts_with = "profile")]
    pub all: bool,

    /// Update only the named profile directory
    #[arg(long)]
    pub profile: Option<String>,

    /// Do not ask for confirmation before writing
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Compute and report the merge without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the backup copy before writing
    #[arg(long)]
    pub no_backup: bool,

    /// Print the unified diff for each profile (dry run only)
    #[arg(long, requires = "dry_run")]
    pub show_diff: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
