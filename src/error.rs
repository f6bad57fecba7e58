//! Error types for custom-resource handlers.
//!
//! Failures fall into two families: validation errors raised while resolving
//! resource properties (before any remote call is made), and remote call errors
//! raised by a [`CatalogClient`](crate::catalog::CatalogClient). Both surface to
//! the orchestrator through [`HandlerError`], which fails the lifecycle event.

use crate::catalog::CatalogOperation;

/// Main error type for handler invocations.
///
/// Returning this from a handler fails the lifecycle event; the orchestrator
/// reports the resource operation as FAILED and rolls the stack back.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Resource properties were missing or malformed
    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationError),

    /// The catalog service rejected or failed a call
    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteCallError),

    /// Update or Delete arrived without the id assigned at Create time
    #[error("{request_type} event for {resource} is missing PhysicalResourceId")]
    MissingPhysicalResourceId {
        request_type: String,
        resource: &'static str,
    },

    /// Event payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for resource properties.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required properties are absent or empty
    #[error("{resource} is missing required properties: {}", .missing.join(", "))]
    MissingRequiredProperties {
        resource: &'static str,
        missing: Vec<&'static str>,
    },

    /// Property holds an object or array where a scalar is expected
    #[error("Property '{property}' must be a string or scalar, got {actual}")]
    InvalidPropertyType {
        property: &'static str,
        actual: &'static str,
    },

    /// Property holds a value outside its allowed set
    #[error("Property '{property}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidPropertyValue {
        property: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

/// A catalog call that failed.
///
/// Carries the operation that was attempted and the underlying fault so that
/// logs identify which step of a lifecycle event went wrong.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {source}")]
pub struct RemoteCallError {
    operation: CatalogOperation,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl RemoteCallError {
    /// Wrap a transport or service error raised by `operation`.
    pub fn new<E>(operation: CatalogOperation, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            operation,
            source: Box::new(error),
        }
    }

    /// The catalog operation that failed.
    pub fn operation(&self) -> CatalogOperation {
        self.operation
    }
}

impl ValidationError {
    /// Create a missing properties error
    pub fn missing_required(resource: &'static str, missing: Vec<&'static str>) -> Self {
        Self::MissingRequiredProperties { resource, missing }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        property: &'static str,
        value: impl Into<String>,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::InvalidPropertyValue {
            property,
            value: value.into(),
            allowed,
        }
    }
}

// Result type aliases for convenience
pub type HandlerResult<T> = Result<T, HandlerError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type RemoteResult<T> = Result<T, RemoteCallError>;
