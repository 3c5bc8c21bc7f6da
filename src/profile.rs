//! Profile discovery and preference file storage.

use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A candidate browser profile directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub path: PathBuf,
}

impl Profile {
    /// Path of the named preference file inside this profile.
    pub fn preference_file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }
}

/// Epoch seconds taken once per run and shared by every backup in that run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupStamp(pub i64);

impl BackupStamp {
    pub fn now() -> Self {
        BackupStamp(chrono::Utc::now().timestamp())
    }
}

impl std::fmt::Display for BackupStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backup location for `path`: `<file name>.<stamp>.bak` beside the original.
pub fn backup_path(path: &Path, stamp: BackupStamp) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.bak", file_name, stamp))
}

/// Storage operations the sync pipeline needs
pub trait PreferenceStorage {
    /// Candidate profile directories under `root`, sorted by name
    fn list_profiles(&self, root: &Path) -> Result<Vec<Profile>, SyncError>;

    fn exists(&self, path: &Path) -> bool;

    fn read_lines(&self, path: &Path) -> Result<Vec<String>, SyncError>;

    /// Replace the file with `lines` joined by `\n` plus a trailing newline; CRLF files come back as LF
    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), SyncError>;

    /// Copy `path` to its backup location and return that location
    fn backup(&self, path: &Path, stamp: BackupStamp) -> Result<PathBuf, SyncError>;
}

/// Filesystem-backed storage
pub struct FsPreferenceStorage;

impl FsPreferenceStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsPreferenceStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStorage for FsPreferenceStorage {
    fn list_profiles(&self, root: &Path) -> Result<Vec<Profile>, SyncError> {
        if !root.is_dir() {
            return Err(SyncError::Selection(format!(
                "profile root {} does not exist",
                root.display()
            )));
        }

        let entries = std::fs::read_dir(root).map_err(|e| SyncError::io(root, e))?;
        let mut profiles = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = match path.file_name().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    tracing::warn!("Skipping profile with non-UTF8 name: {:?}", path);
                    continue;
                }
            };
            profiles.push(Profile { name, path });
        }
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(root = %root.display(), count = profiles.len(), "Discovered profiles");
        Ok(profiles)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SyncError::MissingFile(path.to_path_buf())
            } else {
                SyncError::io(path, e)
            }
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<(), SyncError> {
        let mut content = lines.join("\n");
        if !lines.is_empty() {
            content.push('\n');
        }
        std::fs::write(path, content).map_err(|e| SyncError::io(path, e))
    }

    fn backup(&self, path: &Path, stamp: BackupStamp) -> Result<PathBuf, SyncError> {
        let target = backup_path(path, stamp);
        std::fs::copy(path, &target).map_err(|e| SyncError::io(path, e))?;
        tracing::info!(from = %path.display(), to = %target.display(), "Backed up preference file");
        Ok(target)
    }
}
