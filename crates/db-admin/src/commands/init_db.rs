//! Init-db command - create every table in the schema definition.

use std::path::PathBuf;

use colored::Colorize;
use lamia_tools::schema;

pub fn run(
    schema_dir: PathBuf,
    dsn: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::database_config(dsn)?;

    println!(
        "{} schema on {}",
        "Creating".cyan().bold(),
        config.describe().white()
    );

    let tables = super::runtime()?.block_on(async {
        let manager = super::schema_manager(&schema_dir, &config)?;
        let tables: Vec<String> = manager
            .definition()
            .table_names()
            .into_iter()
            .map(String::from)
            .collect();
        let result = schema::init(&manager).await;
        manager.close().await;
        result.map(|()| tables)
    })?;

    if verbose {
        for table in &tables {
            println!("  {} {}", "+".green(), table);
        }
    }
    println!(
        "{} {} tables",
        "Created".green().bold(),
        tables.len().to_string().white().bold()
    );

    Ok(())
}
