//! CLI domain: parse, route, output, and presentation only.
//! No merge logic; the route hands a fully built request to the sync service.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use presentation::{format_report_json, format_report_text};
pub use route::RunContext;
