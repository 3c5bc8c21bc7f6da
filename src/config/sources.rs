//! Configuration sources layered on top of the merge policy defaults.

pub mod env;
pub mod explicit_file;
pub mod global_file;
