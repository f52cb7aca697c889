// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ji: command-line front end for the job info log

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use ji_storage::{DurableStore, StorePaths};

use commands::{create, list, prune, show};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "ji",
    version,
    about = "Record and query job info metadata",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// State directory (default: $JI_STATE_DIR, then $XDG_STATE_HOME/ji)
    #[arg(long, value_name = "PATH", global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a new job info
    Create(create::CreateArgs),
    /// Show a job info by ID (or unique prefix)
    Show {
        /// Job info ID or prefix (short ids may start with '-')
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// List job infos, newest first
    List(list::ListArgs),
    /// Remove job infos older than a given age
    Prune(prune::PruneArgs),
    /// Snapshot the store and truncate the write-ahead log
    Compact,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let state_dir = env::state_dir(cli.state_dir)?;
    let store = DurableStore::open(StorePaths::in_dir(&state_dir))
        .with_context(|| format!("failed to open store at {}", state_dir.display()))?;
    let format = cli.output;

    match command {
        Commands::Create(args) => create::handle(args, &store, format),
        Commands::Show { id } => show::handle(&id, &store, format),
        Commands::List(args) => list::handle(args, &store, format),
        Commands::Prune(args) => prune::handle(args, &store, format),
        Commands::Compact => commands::compact::handle(&store, format),
    }
}

fn main() {
    env::init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_error::exit_code(&err));
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
