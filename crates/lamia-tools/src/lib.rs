//! Lamia operator tooling: schema lifecycle, lint orchestration and the
//! translation catalog pipeline.
//!
//! Every component is a thin orchestration over an external collaborator
//! reached through a trait, so the binaries wire in the real tools and tests
//! wire in fakes.
//!
//! - [`schema`]: create-all and confirmation-gated drop-all over a
//!   [`SchemaManager`](schema::SchemaManager).
//! - [`confirm`]: the confirmation gate used before destructive operations.
//! - [`lint`]: discover files, format each in place, lint the set, judge the score.
//! - [`catalog`]: extract / init / compile / update through the catalog compiler.
//!
//! # Example
//!
//! ```no_run
//! use lamia_tools::{CatalogConfig, CatalogPipeline};
//!
//! let pipeline = CatalogPipeline::from_config(CatalogConfig::default());
//! for invocation in pipeline.build().unwrap() {
//!     println!("{} -> {}", invocation.stage, invocation.output.display());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod confirm;
pub mod error;
pub mod lint;
pub mod logging;
pub mod process;
pub mod schema;

pub use catalog::{CatalogCompiler, CatalogPipeline, CatalogStage, StageInvocation};
pub use config::{CatalogConfig, DatabaseConfig, LintConfig};
pub use confirm::{Confirmation, Decision};
pub use error::{Result, ToolError};
pub use lint::{LintOrchestrator, LintReport, LintVerdict};
pub use schema::{ClearOutcome, PgSchemaManager, SchemaDefinition, SchemaManager};
