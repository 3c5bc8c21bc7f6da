//! CLI route: run context built from config plus flags, dispatching one sync run.

use crate::baseline::{BaselineSource, FileBaselineSource, HttpBaselineSource};
use crate::cli::parse::Cli;
use crate::cli::presentation::{format_report_json, format_report_text};
use crate::config::{ConfigLoader, PrefsyncConfig};
use crate::error::SyncError;
use crate::profile::{BackupStamp, FsPreferenceStorage};
use crate::select::{PresetSelector, ProfileSelector, PromptSelector};
use crate::sync::{SyncRequest, SyncService};
use std::io::IsTerminal;

/// Runtime context for one CLI invocation: resolved config and the run's backup stamp.
pub struct RunContext {
    config: PrefsyncConfig,
    stamp: BackupStamp,
    interactive: bool,
}

impl RunContext {
    /// Load config (global file, `--config`, environment) and fold CLI overrides in.
    pub fn new(cli: &Cli, stamp: BackupStamp) -> Result<Self, SyncError> {
        let config = ConfigLoader::load(cli.config.as_deref())?;
        Self::from_config(config, cli, stamp)
    }

    /// Build from an already loaded config.
    pub fn from_config(
        mut config: PrefsyncConfig,
        cli: &Cli,
        stamp: BackupStamp,
    ) -> Result<Self, SyncError> {
        if let Some(ref url) = cli.url {
            config.baseline.url = url.clone();
        }
        if let Some(ref root) = cli.profiles_root {
            config.profiles.root = Some(root.clone());
        }
        if let Some(ref file) = cli.file {
            config.profiles.file = file.clone();
        }
        if cli.no_backup {
            config.backup.enabled = false;
        }
        config.ensure_valid()?;

        Ok(Self {
            config,
            stamp,
            interactive: std::io::stdin().is_terminal(),
        })
    }

    pub fn config(&self) -> &PrefsyncConfig {
        &self.config
    }

    /// Force prompt behavior regardless of whether stdin is a terminal.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Execute the sync run and render the report.
    pub fn execute(&self, cli: &Cli) -> Result<String, SyncError> {
        if cli.format != "text" && cli.format != "json" {
            return Err(SyncError::Config(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                cli.format
            )));
        }

        let source: Box<dyn BaselineSource> = match cli.from_file {
            Some(ref path) => Box::new(FileBaselineSource::new(path)),
            None => Box::new(HttpBaselineSource::new(
                self.config.baseline.url.clone(),
                &self.config.baseline,
            )?),
        };
        let storage = FsPreferenceStorage::new();
        let selector = self.selector(cli);

        let request = SyncRequest {
            profiles_root: self.config.profiles.resolve_root()?,
            preference_file: self.config.profiles.file.clone(),
            parse_options: self.config.merge.clone(),
            dry_run: cli.dry_run,
            backup: self.config.backup.enabled,
            stamp: self.stamp,
        };
        tracing::debug!(?request, "Starting sync run");

        let report = SyncService::new(source.as_ref(), &storage, selector.as_ref()).run(&request)?;

        if cli.format == "json" {
            format_report_json(&report)
        } else {
            let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
            Ok(format_report_text(&report, cli.show_diff, color))
        }
    }

    fn selector(&self, cli: &Cli) -> Box<dyn ProfileSelector> {
        if self.interactive && !cli.all && cli.profile.is_none() {
            Box::new(PromptSelector {
                assume_yes: cli.yes,
            })
        } else {
            Box::new(PresetSelector {
                all: cli.all,
                profile: cli.profile.clone(),
                assume_yes: cli.yes,
                confirm_on_terminal: self.interactive,
            })
        }
    }
}
