//! Prefsync CLI Binary
//!
//! Command-line interface for merging a hardened preference baseline into
//! browser profiles.

use clap::Parser;
use prefsync::cli::{Cli, RunContext};
use prefsync::config::ConfigLoader;
use prefsync::logging::{init_logging, LoggingConfig};
use prefsync::profile::BackupStamp;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let stamp = BackupStamp::now();

    // Build logging config from CLI args and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(stamp = %stamp, "Prefsync starting");

    let context = match RunContext::new(&cli, stamp) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", prefsync::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli) {
        Ok(output) => {
            info!("Sync completed");
            println!("{}", output);
        }
        Err(e) => {
            error!("Sync failed: {}", e);
            eprintln!("{}", prefsync::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load(cli.config.as_deref())
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
