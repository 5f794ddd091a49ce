//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// db-admin: create or drop the Lamia database schema
#[derive(Parser)]
#[command(name = "db-admin")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory of table definitions (*.sql), applied in file-name order
    #[arg(long, global = true, env = "LAMIA_SCHEMA_DIR", default_value = "schema")]
    pub schema_dir: PathBuf,

    /// Database URL; overrides DB_DSN and the DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_DATABASE parts
    #[arg(long, global = true)]
    pub dsn: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create all schema objects
    InitDb,

    /// Drop all schema objects after confirmation
    ClearDb {
        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        skip_confirm: bool,
    },
}
