//! Clear-db command - drop every table after confirmation.

use std::path::PathBuf;

use colored::Colorize;
use lamia_tools::schema::{self, ClearOutcome};
use lamia_tools::Confirmation;

pub fn run(
    schema_dir: PathBuf,
    dsn: Option<String>,
    skip_confirm: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::database_config(dsn)?;

    let outcome = super::runtime()?.block_on(async {
        let manager = super::schema_manager(&schema_dir, &config)?;
        let mut gate = Confirmation::stdio();
        let result = schema::clear(&manager, &mut gate, skip_confirm).await;
        manager.close().await;
        result.map(|outcome| (outcome, manager.definition().clone()))
    })?;

    match outcome {
        (ClearOutcome::Dropped, definition) => {
            if verbose {
                for table in definition.table_names().iter().rev() {
                    println!("  {} {}", "-".red(), table);
                }
            }
            println!(
                "{} {} tables from {}",
                "Dropped".green().bold(),
                definition.tables().len().to_string().white().bold(),
                config.describe().white()
            );
        }
        // The gate already printed the cancellation notice.
        (ClearOutcome::Cancelled, _) => {
            tracing::debug!("nothing dropped");
        }
    }

    Ok(())
}
