//! db-admin - create or drop the Lamia database schema.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    lamia_tools::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::InitDb => commands::init_db::run(cli.schema_dir, cli.dsn, cli.verbose),

        Commands::ClearDb { skip_confirm } => {
            commands::clear_db::run(cli.schema_dir, cli.dsn, skip_confirm, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
