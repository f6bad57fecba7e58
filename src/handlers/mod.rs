//! Lifecycle handlers for the managed catalog entities.
//!
//! Every handler follows the same flow: resolve the event's resource
//! properties, dispatch on the request type, call the [`CatalogClient`] and
//! shape a [`LifecycleResult`]. Deletion is always a two-step compensation,
//! soft-disable and then delete, run through [`disable_then_delete`] with an
//! entity-specific [`ErrorPolicy`].
//!
//! [`CatalogClient`]: crate::catalog::CatalogClient

pub mod form;
pub mod glossary;
pub mod glossary_term;

pub use form::FormHandler;
pub use glossary::GlossaryHandler;
pub use glossary_term::GlossaryTermHandler;

use crate::error::{HandlerResult, RemoteResult};
use crate::event::{LifecycleEvent, LifecycleResult};
use log::{error, info, warn};
use std::future::Future;

/// A custom-resource handler for one entity type.
pub trait CustomResourceHandler: Send + Sync {
    /// Entity name used in logs and errors
    const RESOURCE: &'static str;

    /// Process one lifecycle event.
    ///
    /// An `Err` fails the event; the orchestrator sees a generic failure.
    fn handle(
        &self,
        event: &LifecycleEvent,
    ) -> impl Future<Output = HandlerResult<LifecycleResult>> + Send;
}

/// What to do when the delete step of a teardown fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the event
    Propagate,
    /// Log the failure and report success, leaving the entity disabled
    SuppressAndLog,
}

/// Soft-disable an entity, then delete it.
///
/// A disable failure always propagates and the delete step is never polled.
/// A delete failure is handled according to `policy`.
pub async fn disable_then_delete<D, X>(
    target: &str,
    policy: ErrorPolicy,
    disable: D,
    delete: X,
) -> HandlerResult<()>
where
    D: Future<Output = RemoteResult<()>>,
    X: Future<Output = RemoteResult<()>>,
{
    info!("Disabling {} before deletion", target);
    if let Err(e) = disable.await {
        error!("Failed to disable {}: {}", target, e);
        return Err(e.into());
    }

    info!("Deleting {}", target);
    match (delete.await, policy) {
        (Ok(()), _) => {
            info!("Deleted {}", target);
            Ok(())
        }
        (Err(e), ErrorPolicy::Propagate) => {
            error!("Failed to delete {}: {}", target, e);
            Err(e.into())
        }
        (Err(e), ErrorPolicy::SuppressAndLog) => {
            warn!("Failed to delete {}, leaving it disabled: {}", target, e);
            Ok(())
        }
    }
}
