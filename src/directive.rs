//! Preference directive parsing.
//!
//! A directive is any line containing `<verb>("<key>",` where the verb is an
//! identifier ending in `ref` (`pref`, `defaultPref`, `lockPref`, `user_pref`,
//! ...). Matching is a single lenient pattern: lines that do not match are not
//! directives, and nothing here ever fails.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Verb written into every imported line unless configured otherwise.
pub const DEFAULT_CANONICAL_VERB: &str = "pref";

/// Keys containing this substring belong to prefsync itself and are never imported.
pub const DEFAULT_EXCLUDE_NAMESPACE: &str = "prefsync";

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(\w*ref)\("([^"]*)","#).unwrap());

/// Directive verb family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectiveKind {
    Pref,
    DefaultPref,
    LockPref,
    StickyPref,
    UserPref,
    Other(String),
}

impl DirectiveKind {
    pub fn from_verb(verb: &str) -> Self {
        match verb.to_ascii_lowercase().as_str() {
            "pref" => DirectiveKind::Pref,
            "defaultpref" => DirectiveKind::DefaultPref,
            "lockpref" => DirectiveKind::LockPref,
            "sticky_pref" | "stickypref" => DirectiveKind::StickyPref,
            "user_pref" | "userpref" => DirectiveKind::UserPref,
            _ => DirectiveKind::Other(verb.to_string()),
        }
    }
}

/// A single preference statement from the baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub key: String,
    pub kind: DirectiveKind,
    /// Verb as written in the source line
    pub verb: String,
    /// Source line with the verb replaced by the canonical verb
    pub raw_line: String,
}

/// Baseline directives keyed by preference key, in first-seen source order.
pub type BaselineSet = IndexMap<String, Directive>;

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default = "default_canonical_verb")]
    pub canonical_verb: String,

    /// Case-insensitive substring; matching keys are dropped. Empty disables the rule.
    #[serde(default = "default_exclude_namespace")]
    pub exclude_namespace: String,
}

fn default_canonical_verb() -> String {
    DEFAULT_CANONICAL_VERB.to_string()
}

fn default_exclude_namespace() -> String {
    DEFAULT_EXCLUDE_NAMESPACE.to_string()
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            canonical_verb: default_canonical_verb(),
            exclude_namespace: default_exclude_namespace(),
        }
    }
}

impl ParseOptions {
    fn is_excluded(&self, key: &str) -> bool {
        if self.exclude_namespace.is_empty() {
            return false;
        }
        key.to_lowercase()
            .contains(&self.exclude_namespace.to_lowercase())
    }
}

/// Match a line against the directive pattern, returning `(verb, key)`.
pub fn match_directive(line: &str) -> Option<(&str, &str)> {
    let caps = DIRECTIVE_RE.captures(line)?;
    let verb = caps.get(1)?.as_str();
    let key = caps.get(2)?.as_str();
    Some((verb, key))
}

/// Parse baseline text into a key -> directive mapping.
///
/// Later occurrences of a key replace earlier ones. Text without any
/// directives yields an empty set.
pub fn parse(text: &str, options: &ParseOptions) -> BaselineSet {
    let mut set = BaselineSet::new();
    let mut excluded = 0usize;

    for line in text.lines() {
        let Some((verb, key)) = match_directive(line) else {
            continue;
        };
        if options.is_excluded(key) {
            excluded += 1;
            continue;
        }
        let directive = Directive {
            key: key.to_string(),
            kind: DirectiveKind::from_verb(verb),
            verb: verb.to_string(),
            raw_line: line.replacen(verb, &options.canonical_verb, 1),
        };
        if set.insert(directive.key.clone(), directive).is_some() {
            tracing::trace!(key, "Duplicate baseline key, keeping last occurrence");
        }
    }

    tracing::debug!(directives = set.len(), excluded, "Parsed baseline");
    set
}

/// Parse with the default canonical verb and exclusion namespace.
pub fn parse_with_defaults(text: &str) -> BaselineSet {
    parse(text, &ParseOptions::default())
}
