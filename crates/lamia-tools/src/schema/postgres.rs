//! PostgreSQL schema manager backed by a `sqlx` pool.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::admin::SchemaManager;
use super::definition::SchemaDefinition;

/// Creates and drops the tables of a [`SchemaDefinition`].
///
/// Each operation runs in a single transaction, so a failure part-way leaves
/// the database as it was.
pub struct PgSchemaManager {
    pool: PgPool,
    definition: SchemaDefinition,
    echo: bool,
}

impl PgSchemaManager {
    /// Pool for `config` that connects in the background and on first use, so
    /// the confirmation prompt does not wait on (or fail with) the server.
    /// Must be called inside a tokio runtime.
    pub fn connect_lazy(config: &DatabaseConfig, definition: SchemaDefinition) -> Result<Self> {
        tracing::debug!(target_db = %config.describe(), "configuring database pool");
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .connect_lazy_with(config.connect_options()?);
        Ok(Self::with_pool(pool, definition).with_echo(config.echo))
    }

    /// Wrap an existing pool.
    pub fn with_pool(pool: PgPool, definition: SchemaDefinition) -> Self {
        Self {
            pool,
            definition,
            echo: false,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn echo_statement(&self, sql: &str) {
        if self.echo {
            tracing::info!(statement = %sql.trim(), "executing");
        } else {
            tracing::debug!(statement = %sql.trim(), "executing");
        }
    }
}

impl SchemaManager for PgSchemaManager {
    async fn create_all(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for table in self.definition.tables() {
            self.echo_statement(&table.create_sql);
            sqlx::raw_sql(&table.create_sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn drop_all(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for table in self.definition.tables().iter().rev() {
            let sql = table.drop_sql();
            self.echo_statement(&sql);
            sqlx::raw_sql(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
