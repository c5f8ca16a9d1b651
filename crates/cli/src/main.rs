// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scholar - academic ledger CLI

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{invoke, operations};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "scholar",
    version,
    about = "Scholar - academic records on an append-only ledger"
)]
struct Cli {
    /// Ledger directory (write-ahead log, event log, scholar.toml)
    #[arg(long, global = true, default_value = ".scholar")]
    store: PathBuf,

    /// Configuration file [default: <store>/scholar.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a ledger operation
    Invoke(invoke::InvokeArgs),
    /// List operations and their arguments
    Operations,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let format = cli.output;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => error::report(&e, format),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Invoke(args) => {
            let config_path = cli
                .config
                .unwrap_or_else(|| cli.store.join("scholar.toml"));
            invoke::invoke(args, &cli.store, &config_path, cli.output)
        }
        Commands::Operations => {
            operations::list(cli.output);
            Ok(())
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
