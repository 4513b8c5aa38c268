//! Change-script rendering: the reviewable SQL proposal.
//!
//! The script is a proposal, not an executed transaction: the trailing
//! `COMMIT;` is always emitted commented out and must be uncommented by the
//! reviewer.

use std::fmt::Write;

use crate::config::ScriptConfig;
use crate::model::{ReconReport, RunMode};

const BANNER: &str = "-- ============================================";

/// Render the full change script. Deterministic for a given report: updates
/// first, then inserts, each in feed order.
pub fn render_script(report: &ReconReport, script: &ScriptConfig) -> String {
    let mut out = String::new();
    let target = format!("{}.{}", script.schema, script.table);

    let _ = writeln!(out, "-- Player Reconciliation SQL Script");
    let _ = writeln!(out, "-- Generated: {}", report.meta.run_at);
    let _ = writeln!(
        out,
        "-- Mode: {}",
        match report.meta.mode {
            RunMode::FullReconcile => "FULL RECONCILE",
            RunMode::TeamOnly => "TEAM ONLY",
        }
    );
    let _ = writeln!(out, "-- Updates: {}", report.updates.len());
    let _ = writeln!(out, "-- Inserts: {}", report.inserts.len());
    let _ = writeln!(out, "--");
    let _ = writeln!(out, "-- REVIEW THIS SCRIPT BEFORE EXECUTING");
    let _ = writeln!(out, "--\n");

    if !report.updates.is_empty() {
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "-- PLAYER UPDATES");
        let _ = writeln!(out, "{BANNER}\n");

        for update in &report.updates {
            let _ = writeln!(out, "-- {} (GSIS: {})", update.name, update.external_id);

            let comments: Vec<String> = update
                .changes
                .iter()
                .map(|c| format!("{}: {} -> {}", c.field.label(), c.old_label, c.new_label))
                .collect();
            let set_clauses: Vec<String> = update
                .changes
                .iter()
                .map(|c| format!("{} = {}", c.field.column(), c.new))
                .collect();

            let _ = writeln!(out, "-- Changes: {}", comments.join(", "));
            let _ = writeln!(out, "UPDATE {target}");
            let _ = writeln!(out, "SET {}", set_clauses.join(", "));
            let _ = writeln!(out, "WHERE OID = {};\n", update.store_id);
        }
    }

    if !report.inserts.is_empty() {
        let _ = writeln!(out, "\n{BANNER}");
        let _ = writeln!(out, "-- NEW PLAYERS");
        let _ = writeln!(out, "{BANNER}\n");

        for insert in &report.inserts {
            let _ = writeln!(out, "-- {} (GSIS: {})", insert.display_name, insert.external_id);

            let mut columns = vec![
                "FIRSTNAME",
                "LASTNAME",
                "GSIS",
                "REALTEAMID",
                "POSITIONID",
                "ISONINJUREDRESERVE",
            ];
            let mut values = vec![
                quote(&insert.first_name),
                quote(&insert.last_name),
                quote(&insert.external_id),
                insert.team_id.to_string(),
                insert.position_id.to_string(),
                // Default: not on injured reserve
                "0".to_string(),
            ];

            if let Some(jersey) = insert.jersey_number {
                columns.push("JERSEYNUMBER");
                values.push(jersey.to_string());
            }

            let _ = writeln!(out, "INSERT INTO {target} ({})", columns.join(", "));
            let _ = writeln!(out, "VALUES ({});\n", values.join(", "));
        }
    }

    let _ = writeln!(out, "\n{BANNER}");
    let _ = writeln!(out, "-- COMMIT");
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "-- COMMIT;");
    let _ = writeln!(out, "-- Uncomment above line after reviewing changes");

    out
}

/// Render the errors/warnings log. Returns `None` when both channels are
/// empty and no file should be written.
pub fn render_error_log(report: &ReconReport) -> Option<String> {
    if report.errors.is_empty() && report.warnings.is_empty() {
        return None;
    }

    let mut out = String::new();
    let _ = writeln!(out, "Player Reconciliation - Errors and Warnings");
    let _ = writeln!(out, "Generated: {}", report.meta.run_at);
    let _ = writeln!(out, "{}\n", "=".repeat(80));

    if !report.errors.is_empty() {
        let _ = writeln!(out, "ERRORS:");
        let _ = writeln!(out, "{}", "-".repeat(80));
        for rejection in &report.errors {
            let _ = writeln!(out, "  - {}", rejection.reason);
        }
        let _ = writeln!(out);
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "WARNINGS:");
        let _ = writeln!(out, "{}", "-".repeat(80));
        for rejection in &report.warnings {
            let _ = writeln!(out, "  - {}", rejection.reason);
        }
    }

    Some(out)
}

/// Single-quote a string literal for the script, doubling embedded quotes.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
