//! Configuration System
//!
//! Layered configuration for a sync run: built-in defaults, the user-level
//! config file, an explicit `--config` file and `PREFSYNC_*` environment
//! variables, in increasing order of precedence. CLI flags are applied on top
//! by the run context.

use crate::directive::ParseOptions;
use crate::error::SyncError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;

/// Hardened baseline fetched when no URL is configured.
pub const DEFAULT_BASELINE_URL: &str =
    "https://raw.githubusercontent.com/arkenfox/user.js/master/user.js";

/// Preference file looked up inside each profile directory.
pub const DEFAULT_PREFERENCE_FILE: &str = "user.js";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefsyncConfig {
    /// Where the baseline comes from
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Profile discovery
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Directive normalization
    #[serde(default)]
    pub merge: ParseOptions,

    /// Backups before write-back
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote baseline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_baseline_url")]
    pub url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_baseline_url() -> String {
    DEFAULT_BASELINE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            url: default_baseline_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BaselineConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Profile discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Directory whose sub-directories are browser profiles.
    /// Defaults to `~/.mozilla/firefox` when unset.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Preference file name inside each profile
    #[serde(default = "default_preference_file")]
    pub file: String,
}

fn default_preference_file() -> String {
    DEFAULT_PREFERENCE_FILE.to_string()
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            root: None,
            file: default_preference_file(),
        }
    }
}

impl ProfilesConfig {
    /// Configured root, or the default Firefox profile directory under $HOME.
    pub fn resolve_root(&self) -> Result<PathBuf, SyncError> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        let dirs = directories::BaseDirs::new().ok_or_else(|| {
            SyncError::Config("Cannot determine home directory for profile discovery".to_string())
        })?;
        Ok(dirs.home_dir().join(".mozilla").join("firefox"))
    }
}

/// Backup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Baseline(String),
    Profiles(String),
    Merge(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Baseline(msg) => write!(f, "Baseline: {}", msg),
            ValidationError::Profiles(msg) => write!(f, "Profiles: {}", msg),
            ValidationError::Merge(msg) => write!(f, "Merge: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PrefsyncConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let url = self.baseline.url.trim();
        if url.is_empty() {
            errors.push(ValidationError::Baseline("URL cannot be empty".to_string()));
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ValidationError::Baseline(format!(
                "URL must use http or https: {}",
                url
            )));
        }

        let file = &self.profiles.file;
        if file.trim().is_empty() {
            errors.push(ValidationError::Profiles(
                "Preference file name cannot be empty".to_string(),
            ));
        } else if file.contains('/') || file.contains('\\') {
            errors.push(ValidationError::Profiles(format!(
                "Preference file must be a bare file name: {}",
                file
            )));
        }

        let verb = &self.merge.canonical_verb;
        if verb.is_empty() || !verb.chars().all(|c| c.is_alphanumeric() || c == '_') {
            errors.push(ValidationError::Merge(format!(
                "Canonical verb must be a non-empty identifier: {:?}",
                verb
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into a single `SyncError::Config`.
    pub fn ensure_valid(&self) -> Result<(), SyncError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            SyncError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }
}
