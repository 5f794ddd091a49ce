//! CLI command implementations.

pub mod clear_db;
pub mod init_db;

use std::path::Path;

use lamia_tools::{DatabaseConfig, PgSchemaManager, SchemaDefinition};

/// Database settings from the environment, with `--dsn` taking precedence.
fn database_config(dsn: Option<String>) -> lamia_tools::Result<DatabaseConfig> {
    let config = DatabaseConfig::from_env()?;
    Ok(match dsn {
        Some(dsn) => config.with_dsn(dsn),
        None => config,
    })
}

/// Single-threaded runtime for the one unit of work a command performs.
fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Load the schema definition and build a manager for it.
///
/// Must be called inside the runtime.
fn schema_manager(
    schema_dir: &Path,
    config: &DatabaseConfig,
) -> lamia_tools::Result<PgSchemaManager> {
    let definition = SchemaDefinition::load(schema_dir)?;
    PgSchemaManager::connect_lazy(config, definition)
}
