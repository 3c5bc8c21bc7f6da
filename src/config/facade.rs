//! Config facade: single entry point for loading a validated `PrefsyncConfig`.

use super::merge_policy::builder_with_defaults;
use super::sources::{env, explicit_file, global_file};
use super::PrefsyncConfig;
use crate::error::SyncError;
use std::path::Path;

/// Loads configuration from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the layered configuration.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `explicit` config file, `PREFSYNC_*` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<PrefsyncConfig, SyncError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = env::add_to_builder(builder);

        let config: PrefsyncConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }
}
