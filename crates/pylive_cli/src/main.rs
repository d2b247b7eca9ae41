//! pylive CLI
//!
//! Live re-execution of Python scripts with inline results.

mod cli;
mod commands;
mod utils;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_classify, run_exec, run_init, run_line, run_lsp};
use crate::utils::load_config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the LSP channel, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lsp => run_lsp(load_config(&cli)?).map(|_| false),
        Commands::Run { file, line } => run_line(&load_config(&cli)?, file, *line),
        Commands::Exec { file } => run_exec(&load_config(&cli)?, file),
        Commands::Classify { line } => Ok(run_classify(line)),
        Commands::Init { force } => run_init(Path::new("."), *force).map(|_| false),
    }
}
