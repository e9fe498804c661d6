// vendor-summary/src/main.rs

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { store, log_path } => commands::run::execute(store, log_path, cli.verbose),
        Commands::Inspect { store, limit } => commands::inspect::execute(store, limit),
    };

    // Returning (instead of process::exit) lets the connection drop before the process ends.
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n💥 {:#}", e);
            ExitCode::FAILURE
        }
    }
}
