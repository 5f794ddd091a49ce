//! Schema manager seam and the `init`/`clear` operations built on it.

use std::future::Future;
use std::io::{BufRead, Write};

use crate::confirm::{Confirmation, Decision, DROP_PROMPT, DROP_TOKEN};
use crate::error::Result;

/// Collaborator that owns the application's persistent schema.
///
/// Errors are returned as-is; an object that already exists (or is already
/// gone) is reported however the implementation reports it. The futures are
/// not required to be `Send`; callers drive them on a current-thread runtime.
pub trait SchemaManager {
    /// Create every schema object.
    fn create_all(&self) -> impl Future<Output = Result<()>>;

    /// Drop every schema object.
    fn drop_all(&self) -> impl Future<Output = Result<()>>;
}

/// Result of `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The operator confirmed and the schema was dropped.
    Dropped,
    /// The operator did not confirm; nothing was touched.
    Cancelled,
}

/// Create the full schema. No precondition checks.
pub async fn init<M: SchemaManager>(manager: &M) -> Result<()> {
    tracing::info!("creating schema");
    manager.create_all().await
}

/// Drop the full schema once the gate authorizes it.
pub async fn clear<M, R, W>(
    manager: &M,
    gate: &mut Confirmation<R, W>,
    skip_confirm: bool,
) -> Result<ClearOutcome>
where
    M: SchemaManager,
    R: BufRead,
    W: Write,
{
    match gate.confirm(skip_confirm, DROP_PROMPT, DROP_TOKEN)? {
        Decision::Confirmed => {
            tracing::info!("dropping schema");
            manager.drop_all().await?;
            Ok(ClearOutcome::Dropped)
        }
        Decision::Denied => {
            tracing::info!("schema drop cancelled by operator");
            Ok(ClearOutcome::Cancelled)
        }
    }
}
