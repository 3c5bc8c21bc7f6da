//! Sync pipeline: fetch the baseline once, then merge it into each selected
//! profile's preference file in turn.
//!
//! Fetch, selection and the existence check of every target file all happen
//! before the first write, so those failures never leave a run half applied.

use crate::baseline::{fetch_blocking, BaselineSource};
use crate::directive::{parse, BaselineSet, ParseOptions};
use crate::error::SyncError;
use crate::merge::{merge, MergeResult};
use crate::profile::{BackupStamp, PreferenceStorage, Profile};
use crate::select::ProfileSelector;
use serde::Serialize;
use similar::TextDiff;
use std::path::{Path, PathBuf};

/// Parameters of one run
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub profiles_root: PathBuf,
    pub preference_file: String,
    pub parse_options: ParseOptions,
    pub dry_run: bool,
    pub backup: bool,
    pub stamp: BackupStamp,
}

/// Result for a single profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOutcome {
    pub profile: Profile,
    pub target: PathBuf,
    pub overridden_count: usize,
    pub inserted_count: usize,
    pub overridden_keys: Vec<String>,
    pub inserted_keys: Vec<String>,
    pub backup: Option<PathBuf>,
    /// False when the merge reproduced the file content exactly
    pub changed: bool,
    pub written: bool,
    /// Unified diff of the change, recorded on dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub source: String,
    pub directive_count: usize,
    pub dry_run: bool,
    pub cancelled: bool,
    pub outcomes: Vec<ProfileOutcome>,
}

impl SyncReport {
    pub fn total_overridden(&self) -> usize {
        self.outcomes.iter().map(|o| o.overridden_count).sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.outcomes.iter().map(|o| o.inserted_count).sum()
    }
}

/// Orchestrates a run over injected collaborators
pub struct SyncService<'a> {
    source: &'a dyn BaselineSource,
    storage: &'a dyn PreferenceStorage,
    selector: &'a dyn ProfileSelector,
}

impl<'a> SyncService<'a> {
    pub fn new(
        source: &'a dyn BaselineSource,
        storage: &'a dyn PreferenceStorage,
        selector: &'a dyn ProfileSelector,
    ) -> Self {
        Self {
            source,
            storage,
            selector,
        }
    }

    pub fn run(&self, request: &SyncRequest) -> Result<SyncReport, SyncError> {
        let text = fetch_blocking(self.source)?;
        let baseline = parse(&text, &request.parse_options);
        if baseline.is_empty() {
            tracing::warn!(source = %self.source.describe(), "Baseline contains no directives");
        } else {
            tracing::info!(directives = baseline.len(), "Baseline parsed");
        }

        let candidates = self.storage.list_profiles(&request.profiles_root)?;
        let selection = self.selector.select(&candidates)?;
        let targets = selection.resolve(&candidates)?;

        let files: Vec<(Profile, PathBuf)> = targets
            .into_iter()
            .map(|p| (p.clone(), p.preference_file(&request.preference_file)))
            .collect();
        for (_, file) in &files {
            if !self.storage.exists(file) {
                return Err(SyncError::MissingFile(file.clone()));
            }
        }

        let mut report = SyncReport {
            source: self.source.describe(),
            directive_count: baseline.len(),
            dry_run: request.dry_run,
            cancelled: false,
            outcomes: Vec::with_capacity(files.len()),
        };

        if !request.dry_run {
            let prompt = format!(
                "Write {} baseline directives to {} profile(s)?",
                baseline.len(),
                files.len()
            );
            if !self.selector.confirm(&prompt)? {
                tracing::info!("Write declined");
                report.cancelled = true;
                return Ok(report);
            }
        }

        for (profile, file) in files {
            let outcome = self.sync_profile(&baseline, profile, &file, request)?;
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    fn sync_profile(
        &self,
        baseline: &BaselineSet,
        profile: Profile,
        file: &Path,
        request: &SyncRequest,
    ) -> Result<ProfileOutcome, SyncError> {
        let original = self.storage.read_lines(file)?;
        let result = merge(baseline, original.clone());
        let changed = !result.is_noop(&original);
        let MergeResult {
            overridden_count,
            inserted_count,
            merged_lines,
            overridden_keys,
            inserted_keys,
        } = result;

        tracing::info!(
            profile = %profile.name,
            overridden = overridden_count,
            inserted = inserted_count,
            changed,
            dry_run = request.dry_run,
            "Merged profile"
        );

        let mut outcome = ProfileOutcome {
            profile,
            target: file.to_path_buf(),
            overridden_count,
            inserted_count,
            overridden_keys,
            inserted_keys,
            backup: None,
            changed,
            written: false,
            diff: None,
        };

        if request.dry_run {
            outcome.diff = Some(unified_diff(&original, &merged_lines, file));
            return Ok(outcome);
        }

        if request.backup {
            outcome.backup = Some(self.storage.backup(file, request.stamp)?);
        }
        self.storage.write_lines(file, &merged_lines)?;
        outcome.written = true;
        Ok(outcome)
    }
}

fn unified_diff(old: &[String], new: &[String], file: &Path) -> String {
    let old_text = join_lines(old);
    let new_text = join_lines(new);
    let name = file.display().to_string();
    TextDiff::from_lines(&old_text, &new_text)
        .unified_diff()
        .context_radius(1)
        .header(&name, &name)
        .to_string()
}

fn join_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    text
}
