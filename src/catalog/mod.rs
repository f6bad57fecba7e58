//! Catalog client abstraction.
//!
//! [`CatalogClient`] is the only seam between the handlers and the remote
//! data catalog. It exposes exactly the calls the lifecycle mapping needs:
//!
//! | Entity        | Calls                                                          |
//! |---------------|----------------------------------------------------------------|
//! | Form type     | `upsert_form_type`, `delete_form_type`                         |
//! | Glossary      | `create_glossary`, `update_glossary`, `delete_glossary`        |
//! | Glossary term | `create_glossary_term`, `update_glossary_term`, `delete_glossary_term` |
//!
//! Two implementations ship with the crate: [`DataZoneCatalog`] talks to
//! Amazon DataZone through the AWS SDK, and [`InMemoryCatalog`] keeps the
//! catalog in process for local replay and tests.
//!
//! # Request shapes
//!
//! Requests are plain structs that serialize to the camelCase payload the
//! catalog API documents. Glossary-term requests are sparse: every optional
//! field is an `Option` and is left out of the payload when `None`, because the
//! term API treats an omitted field ("leave unchanged") differently from an
//! empty one ("clear").

pub mod datazone;
pub mod in_memory;

pub use datazone::DataZoneCatalog;
pub use in_memory::{InMemoryCatalog, InMemoryCatalogError};

use crate::error::{RemoteResult, ValidationError, ValidationResult};
use crate::properties::present;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// Remote operations, named after the catalog API actions they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogOperation {
    CreateFormType,
    DeleteFormType,
    CreateGlossary,
    UpdateGlossary,
    DeleteGlossary,
    CreateGlossaryTerm,
    UpdateGlossaryTerm,
    DeleteGlossaryTerm,
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Enablement status shared by forms, glossaries and terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Enabled,
    Disabled,
}

impl EntityStatus {
    pub const ALLOWED: &'static [&'static str] = &["ENABLED", "DISABLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Enabled => "ENABLED",
            EntityStatus::Disabled => "DISABLED",
        }
    }

    /// Parse a status property value.
    pub fn parse(property: &'static str, value: &str) -> ValidationResult<Self> {
        match value {
            "ENABLED" => Ok(EntityStatus::Enabled),
            "DISABLED" => Ok(EntityStatus::Disabled),
            other => Err(ValidationError::invalid_value(property, other, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Idempotency token attached to create/update calls.
///
/// A fresh token is generated for every call, so a retried invocation is not
/// deduplicated by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Create-or-replace request for a form type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTypeInput {
    pub domain_identifier: String,
    pub owning_project_identifier: String,
    pub name: String,
    pub description: String,
    pub status: EntityStatus,
    /// Smithy schema definition of the form
    pub model_smithy: String,
}

/// Identity of a stored form type revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTypeRevision {
    pub name: String,
    pub revision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGlossaryInput {
    pub client_token: ClientToken,
    pub domain_identifier: String,
    pub owning_project_identifier: String,
    pub name: String,
    pub description: String,
    pub status: EntityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlossaryInput {
    pub client_token: ClientToken,
    pub domain_identifier: String,
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub status: EntityStatus,
}

/// Sparse glossary-term attributes.
///
/// Setters drop empty values, so only fields the caller actually supplied
/// reach the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

impl GlossaryTermFields {
    pub fn name<S: Into<String>>(mut self, value: Option<S>) -> Self {
        self.name = present(value);
        self
    }

    pub fn status(mut self, value: Option<EntityStatus>) -> Self {
        self.status = value;
        self
    }

    pub fn short_description<S: Into<String>>(mut self, value: Option<S>) -> Self {
        self.short_description = present(value);
        self
    }

    pub fn long_description<S: Into<String>>(mut self, value: Option<S>) -> Self {
        self.long_description = present(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGlossaryTermInput {
    pub client_token: ClientToken,
    pub domain_identifier: String,
    pub glossary_identifier: String,
    #[serde(flatten)]
    pub fields: GlossaryTermFields,
}

/// Term updates carry no client token; the catalog API does not accept one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlossaryTermInput {
    pub domain_identifier: String,
    pub glossary_identifier: String,
    pub identifier: String,
    #[serde(flatten)]
    pub fields: GlossaryTermFields,
}

/// Client for the remote data catalog.
///
/// Every method is a single remote call. Implementations must not retry.
pub trait CatalogClient: Send + Sync {
    /// Create a form type, or replace the one with the same name.
    ///
    /// The catalog keys form types by name, so this call serves Create and
    /// Update alike and returns the revision it produced.
    fn upsert_form_type(
        &self,
        input: &FormTypeInput,
    ) -> impl Future<Output = RemoteResult<FormTypeRevision>> + Send;

    fn delete_form_type(
        &self,
        domain_identifier: &str,
        name: &str,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Create a glossary and return its server-assigned id.
    fn create_glossary(
        &self,
        input: &CreateGlossaryInput,
    ) -> impl Future<Output = RemoteResult<String>> + Send;

    fn update_glossary(
        &self,
        input: &UpdateGlossaryInput,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    fn delete_glossary(
        &self,
        domain_identifier: &str,
        identifier: &str,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Create a glossary term and return its server-assigned id.
    fn create_glossary_term(
        &self,
        input: &CreateGlossaryTermInput,
    ) -> impl Future<Output = RemoteResult<String>> + Send;

    fn update_glossary_term(
        &self,
        input: &UpdateGlossaryTermInput,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    fn delete_glossary_term(
        &self,
        domain_identifier: &str,
        identifier: &str,
    ) -> impl Future<Output = RemoteResult<()>> + Send;
}
