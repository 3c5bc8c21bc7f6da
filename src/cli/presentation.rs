//! Report presentation: text (comfy-table, owo-colors) and JSON.

use crate::error::SyncError;
use crate::sync::SyncReport;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
fn heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

fn colored_count(n: usize, color: bool) -> String {
    if color && n > 0 {
        format!("{}", n.green())
    } else {
        n.to_string()
    }
}

pub fn format_report_text(report: &SyncReport, show_diff: bool, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", heading("Baseline", color)));
    out.push_str(&format!(
        "  Source: {}\n  Directives: {}\n",
        report.source, report.directive_count
    ));
    if report.directive_count == 0 {
        out.push_str("  Baseline contains no directives; nothing to merge.\n");
    }

    if report.cancelled {
        let msg = "Cancelled: no files were written.";
        if color {
            out.push_str(&format!("\n{}", msg.yellow()));
        } else {
            out.push_str(&format!("\n{}", msg));
        }
        return out;
    }

    out.push('\n');
    let title = if report.dry_run {
        "Dry run (nothing written)"
    } else {
        "Profiles updated"
    };
    out.push_str(&format!("{}\n", heading(title, color)));

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec![
        "Profile",
        "File",
        "Overridden",
        "Inserted",
        "Changed",
        "Backup",
    ]);
    for o in &report.outcomes {
        let backup = o
            .backup
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            o.profile.name.clone(),
            o.target.display().to_string(),
            o.overridden_count.to_string(),
            o.inserted_count.to_string(),
            if o.changed { "yes" } else { "no" }.to_string(),
            backup,
        ]);
    }
    out.push_str(&table.to_string());
    out.push_str(&format!(
        "\nTotal: {} overridden, {} inserted",
        colored_count(report.total_overridden(), color),
        colored_count(report.total_inserted(), color)
    ));

    if show_diff {
        for o in &report.outcomes {
            match o.diff.as_deref() {
                Some(_) if !o.changed => {
                    out.push_str(&format!("\n\n{}: no changes", o.profile.name))
                }
                Some(diff) => out.push_str(&format!("\n\n{}", diff.trim_end())),
                None => {}
            }
        }
    }

    out
}

pub fn format_report_json(report: &SyncReport) -> Result<String, SyncError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| SyncError::Config(format!("Failed to serialize report: {}", e)))
}
