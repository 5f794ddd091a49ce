//! Schema lifecycle: create-all and confirmation-gated drop-all.

mod admin;
mod definition;
mod postgres;

pub use admin::{ClearOutcome, SchemaManager, clear, init};
pub use definition::{SchemaDefinition, TableDef};
pub use postgres::PgSchemaManager;
