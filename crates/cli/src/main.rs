// Roster CLI - reconcile a roster feed against the player table.

mod exit_codes;
mod reconcile;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;
use reconcile::RunArgs;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Reconcile a roster feed against the player table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation and generate a reviewable SQL change script
    #[command(after_help = "\
Examples:
  roster run --feed players.csv --store players_export.csv
  roster run --feed players.csv --store players_export.csv --full-reconcile
  roster run --feed players.csv --store players_export.csv --dry-run
  roster run --feed players.csv --store players_export.csv --json > report.json")]
    Run {
        /// Path to the reconciliation config file
        #[arg(long, default_value = "roster.toml")]
        config: PathBuf,

        /// Roster feed CSV (already fetched)
        #[arg(long)]
        feed: PathBuf,

        /// Player table snapshot CSV export
        #[arg(long)]
        store: PathBuf,

        /// Include position reconciliation (default: team only)
        #[arg(long)]
        full_reconcile: bool,

        /// Show changes without generating a SQL script
        #[arg(long)]
        dry_run: bool,

        /// Print the full JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Directory for generated script and log files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Validate a reconciliation config without running
    #[command(after_help = "\
Examples:
  roster validate roster.toml")]
    Validate {
        /// Path to the config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            feed,
            store,
            full_reconcile,
            dry_run,
            json,
            out_dir,
        } => reconcile::cmd_run(RunArgs {
            config,
            feed,
            store,
            full_reconcile,
            dry_run,
            json,
            out_dir,
        }),
        Commands::Validate { config } => reconcile::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}
