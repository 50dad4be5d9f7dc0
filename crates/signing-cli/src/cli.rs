//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Signing Order Manager - Replay signer-list edits from a script
#[derive(Parser, Debug)]
#[command(name = "signers")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run a scripted session and print the resulting signer list
    ///
    /// Examples:
    ///   signers run session.toml
    ///   signers run session.toml --json
    ///   signers run session.toml -c form.toml
    Run {
        /// Session script (TOML)
        script: PathBuf,

        /// Form configuration file
        #[arg(short, long, env = "SIGNERS_CONFIG")]
        config: Option<PathBuf>,

        /// Print the submitted payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a session script without running it
    Validate {
        /// Session script (TOML)
        script: PathBuf,
    },
}
