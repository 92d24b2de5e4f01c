//! candidate-rulebook - Command-line entry point
//!
//! Runs spreadsheet rows (JSON) through the field inference pipeline and
//! prints the per-row decisions, or re-validates a hand-edited record.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use candidate_rulebook::commands::import_cmds;
use candidate_rulebook::ImportCategory;

/// Command-line arguments for candidate-rulebook
#[derive(Parser, Debug)]
#[command(name = "candidate-rulebook")]
#[command(about = "Infer canonical candidate records from arbitrary spreadsheet rows")]
#[command(version)]
struct Cli {
    /// Rulebook config (JSON); built-in defaults when omitted
    #[arg(short, long, global = true, env = "RULEBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a JSON array of rows (`-` reads stdin)
    Process {
        input: PathBuf,

        /// Print only the fixed records of rows ready for import
        #[arg(long)]
        ready_only: bool,
    },
    /// Re-run auto-fix and validation on one record (`-` reads stdin)
    Revalidate { input: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let rulebook = import_cmds::load_rulebook(cli.config.as_deref())
        .context("Failed to load rulebook config")?;

    match &cli.command {
        Command::Process { input, ready_only } => {
            let json = read_input(input)?;
            let batch = import_cmds::process_rows_json(&rulebook, &json)
                .with_context(|| format!("Failed to process rows from {}", input.display()))?;
            info!(
                "{} rows: {} ready, {} review, {} blocked",
                batch.stats.total, batch.stats.ready, batch.stats.review, batch.stats.blocked
            );

            if *ready_only {
                let ready: Vec<_> = batch.importable().collect();
                print_json(&ready, cli.pretty)?;
            } else {
                print_json(&batch, cli.pretty)?;
            }

            if batch.stats.total > 0 && batch.stats.blocked == batch.stats.total {
                log::warn!("Every row is {}", ImportCategory::Blocked);
            }
        }
        Command::Revalidate { input } => {
            let json = read_input(input)?;
            let result = import_cmds::revalidate_json(&rulebook, &json)
                .with_context(|| format!("Failed to revalidate record from {}", input.display()))?;
            print_json(&result, cli.pretty)?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
