//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pylive - Live re-execution of Python scripts with inline results
#[derive(Parser)]
#[command(name = "pylive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interpreter to run scripts with (overrides pythonPath)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the LSP server
    Lsp,

    /// Run a file up to a line and print the inline annotation for it
    Run {
        /// Python file
        file: PathBuf,

        /// Target line (1-based)
        #[arg(short, long)]
        line: usize,
    },

    /// Run a whole file as a selected block
    Exec {
        /// Python file
        file: PathBuf,
    },

    /// Print whether a line would trigger a live run
    Classify {
        /// Source line
        line: String,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
