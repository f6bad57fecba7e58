//! CloudFormation custom-resource handlers for Amazon DataZone.
//!
//! Manages three kinds of catalog metadata from infrastructure templates:
//! form types, business glossaries and glossary terms. Each handler maps a
//! Create/Update/Delete lifecycle event onto calls against a
//! [`CatalogClient`] and returns the identity the orchestrator tracks.
//!
//! # Core Components
//!
//! - [`FormHandler`], [`GlossaryHandler`], [`GlossaryTermHandler`] - one handler per entity
//! - [`CatalogClient`] - the remote catalog seam, with [`DataZoneCatalog`] and [`InMemoryCatalog`]
//! - [`LifecycleEvent`] / [`LifecycleResult`] - the orchestrator protocol
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use datazone_resources::{CustomResourceHandler, GlossaryHandler, InMemoryCatalog, LifecycleEvent};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = GlossaryHandler::new(InMemoryCatalog::new());
//! let event = LifecycleEvent::create(json!({
//!     "DomainIdentifier": "dzd_1",
//!     "OwningProjectIdentifier": "prj_1",
//!     "GlossaryName": "Finance"
//! }));
//! let result = handler.handle(&event).await?;
//! println!("glossary id: {:?}", result.physical_resource_id);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod properties;
pub mod runtime;

// Re-export commonly used types for convenience
pub use catalog::{CatalogClient, DataZoneCatalog, EntityStatus, InMemoryCatalog};
pub use config::HandlerConfig;
pub use error::{HandlerError, HandlerResult, RemoteCallError, ValidationError};
pub use event::{LifecycleEvent, LifecycleResult, RequestType};
pub use handlers::{
    CustomResourceHandler, ErrorPolicy, FormHandler, GlossaryHandler, GlossaryTermHandler,
};
