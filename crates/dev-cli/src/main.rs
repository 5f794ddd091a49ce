//! dev-cli - lint and translation catalog tasks for Lamia development.

mod cli;
mod commands;

use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    lamia_tools::logging::init(cli.verbose);

    let timeout = Duration::from_secs(cli.timeout);

    let result = match cli.command {
        Commands::Lint {
            changed_only,
            path,
            json,
        } => commands::lint::run(path, changed_only, json, cli.project_root, timeout, cli.verbose),

        Commands::BuildBabel => commands::babel::build(cli.project_root, timeout, cli.verbose),

        Commands::UpdateBabel => commands::babel::update(cli.project_root, timeout, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
