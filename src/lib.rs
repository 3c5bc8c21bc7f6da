//! Prefsync: hardened preference baselines for browser profiles
//!
//! Downloads a preference baseline, parses its `pref`-family directives and
//! merges them into local profile preference files, replacing existing
//! entries in place and appending new ones.

pub mod baseline;
pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod logging;
pub mod merge;
pub mod profile;
pub mod select;
pub mod sync;
