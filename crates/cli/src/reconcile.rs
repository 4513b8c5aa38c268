//! `roster run` / `roster validate` — config-driven roster reconciliation.

use std::path::{Path, PathBuf};

use roster_recon::{
    load_feed_rows, load_store_rows, render_error_log, render_script, render_summary,
    ReconInput, ReconcileConfig, RunMode,
};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::CliError;

fn invalid_config(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
}

fn runtime(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RUNTIME, message: msg.into(), hint: None }
}

pub struct RunArgs {
    pub config: PathBuf,
    pub feed: PathBuf,
    pub store: PathBuf,
    pub full_reconcile: bool,
    pub dry_run: bool,
    pub json: bool,
    pub out_dir: PathBuf,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&args.config)
        .map_err(|e| runtime(format!("cannot read config: {e}")))?;
    let config = ReconcileConfig::from_toml(&config_str)
        .map_err(|e| invalid_config(e.to_string()))?;

    let mode = RunMode::from_flag(args.full_reconcile);
    eprintln!(
        "reconcile '{}': mode {}{}",
        config.name,
        mode,
        if args.dry_run { " (dry run)" } else { "" },
    );

    let feed_csv = read_input(&args.feed)?;
    let store_csv = read_input(&args.store)?;

    let input = ReconInput {
        source: load_feed_rows(&feed_csv).map_err(|e| runtime(e.to_string()))?,
        store: load_store_rows(&store_csv).map_err(|e| runtime(e.to_string()))?,
    };
    eprintln!(
        "loaded {} feed rows, {} store rows",
        input.source.len(),
        input.store.len(),
    );

    let report = roster_recon::run(&config, &input, mode)
        .map_err(|e| runtime(e.to_string()))?;

    eprint!("{}", render_summary(&report));

    let timestamp = chrono::Local::now()
        .format(&config.output.timestamp_format)
        .to_string();

    if let Some(log) = render_error_log(&report) {
        let log_path = args
            .out_dir
            .join(format!("{}_errors_{timestamp}.log", config.output.log_file_prefix));
        std::fs::write(&log_path, log)
            .map_err(|e| runtime(format!("cannot write {}: {e}", log_path.display())))?;
        eprintln!("errors and warnings written to: {}", log_path.display());
    }

    if args.dry_run {
        eprintln!("dry run - no SQL script generated");
    } else if report.is_empty() {
        eprintln!("no changes detected - no SQL script generated");
    } else {
        let script_path = args
            .out_dir
            .join(format!("{}_{timestamp}.sql", config.output.sql_file_prefix));
        std::fs::write(&script_path, render_script(&report, &config.script))
            .map_err(|e| runtime(format!("cannot write {}: {e}", script_path.display())))?;
        eprintln!("SQL script generated: {}", script_path.display());
        eprintln!("review the script before executing it against the database");
    }

    if args.json {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| runtime(format!("cannot read config: {e}")))?;

    match ReconcileConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' with {} team(s), {} position(s), target {}.{}",
                config.name,
                config.teams.len(),
                config.positions.len(),
                config.script.schema,
                config.script.table,
            );
            Ok(())
        }
        Err(e) => Err(invalid_config(e.to_string())),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| runtime(format!("cannot read {}: {e}", path.display())))
}
