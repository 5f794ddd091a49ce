//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lamia_tools::config::DEFAULT_SOURCE_ROOT;

/// dev-cli: lint and translation catalog tasks for Lamia development
#[derive(Parser)]
#[command(name = "dev-cli")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding .style.yapf, .pylintrc and babel.cfg
    #[arg(long, global = true, default_value = ".")]
    pub project_root: PathBuf,

    /// Seconds each external program may run before it is killed
    #[arg(long, global = true, default_value = "300")]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format source files in place, then lint them
    Lint {
        /// Only touch files changed in the working tree (ignores PATH)
        #[arg(short, long)]
        changed_only: bool,

        /// Directory to scan for source files
        #[arg(value_name = "PATH", default_value = DEFAULT_SOURCE_ROOT, value_parser = existing_path)]
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract messages, create the locale catalog and compile it
    BuildBabel,

    /// Refresh the locale catalog from the message template
    UpdateBabel,
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", value))
    }
}
