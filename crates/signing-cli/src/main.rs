//! Signing Order Manager CLI
//!
//! Runs scripted signer-list sessions through the signing-order engine.

mod cli;
mod commands;
mod error;
mod script;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Run {
            script,
            config,
            json,
        }) => commands::run_script(&script, config.as_deref(), json),
        Some(Commands::Validate { script }) => commands::run_validate(&script),
        None => {
            println!("{} Signing Order Manager", "signers".green().bold());
            println!();
            println!("Run {} for available commands.", "signers --help".cyan());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let installed = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(e) = installed {
        eprintln!("{}: could not install logger: {}", "warning".yellow(), e);
    } else if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
