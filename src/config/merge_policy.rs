//! Merge rules: defaults applied before any file or environment source.

use super::{DEFAULT_BASELINE_URL, DEFAULT_PREFERENCE_FILE};
use crate::directive::{DEFAULT_CANONICAL_VERB, DEFAULT_EXCLUDE_NAMESPACE};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("baseline.url", DEFAULT_BASELINE_URL)?
        .set_default("baseline.connect_timeout_secs", 10)?
        .set_default("baseline.request_timeout_secs", 60)?
        .set_default("profiles.file", DEFAULT_PREFERENCE_FILE)?
        .set_default("merge.canonical_verb", DEFAULT_CANONICAL_VERB)?
        .set_default("merge.exclude_namespace", DEFAULT_EXCLUDE_NAMESPACE)?
        .set_default("backup.enabled", true)
}
