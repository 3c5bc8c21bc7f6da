//! Merging baseline directives into an existing preference file.
//!
//! One left-to-right pass over the existing lines. A matching directive line
//! whose key is in the baseline is replaced by the baseline line; everything
//! else passes through untouched. Baseline keys never seen in the file are
//! appended at the end in baseline order.

use crate::directive::{match_directive, BaselineSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of merging a baseline into one preference file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    pub overridden_count: usize,
    pub inserted_count: usize,
    pub merged_lines: Vec<String>,
    /// Keys replaced in place, in file order
    pub overridden_keys: Vec<String>,
    /// Keys appended at the end, in baseline order
    pub inserted_keys: Vec<String>,
}

impl MergeResult {
    /// True when the merge left the file content unchanged.
    pub fn is_noop(&self, original: &[String]) -> bool {
        self.inserted_count == 0 && self.merged_lines.as_slice() == original
    }
}

/// Merge `baseline` into `existing`.
///
/// The baseline is only borrowed, so the same set can be applied to any number
/// of profiles. Only the first occurrence of a key in `existing` is replaced;
/// later lines with the same key are left as they are.
pub fn merge(baseline: &BaselineSet, existing: Vec<String>) -> MergeResult {
    let mut satisfied: HashSet<&str> = HashSet::with_capacity(baseline.len());
    let mut result = MergeResult {
        merged_lines: existing,
        ..MergeResult::default()
    };

    for line in result.merged_lines.iter_mut() {
        let Some((_, key)) = match_directive(line) else {
            continue;
        };
        let Some((stored_key, directive)) = baseline.get_key_value(key) else {
            continue;
        };
        if !satisfied.insert(stored_key.as_str()) {
            tracing::trace!(key = %stored_key, "Key already overridden, leaving repeat untouched");
            continue;
        }
        result.overridden_keys.push(stored_key.clone());
        *line = directive.raw_line.clone();
    }

    for (key, directive) in baseline {
        if satisfied.contains(key.as_str()) {
            continue;
        }
        result.merged_lines.push(directive.raw_line.clone());
        result.inserted_keys.push(key.clone());
    }

    result.overridden_count = result.overridden_keys.len();
    result.inserted_count = result.inserted_keys.len();

    tracing::debug!(
        overridden = result.overridden_count,
        inserted = result.inserted_count,
        "Merged baseline"
    );
    result
}
