use std::fmt::Write;

use crate::model::ReconReport;

/// Render the end-of-run summary block. The position line only appears in
/// full-reconcile mode, matching what the run actually inspected.
pub fn render_summary(report: &ReconReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "RECONCILIATION SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Team Updates:      {}", report.stats.team_updates);
    if report.meta.mode.is_full() {
        let _ = writeln!(out, "Position Updates:  {}", report.stats.position_updates);
    }
    let _ = writeln!(out, "New Players:       {}", report.stats.new_players);
    let _ = writeln!(out, "Unchanged:         {}", report.stats.unchanged);
    let _ = writeln!(out, "Warnings:          {}", report.stats.warnings);
    let _ = writeln!(out, "Errors:            {}", report.stats.errors);
    let _ = writeln!(out, "{rule}");

    out
}
