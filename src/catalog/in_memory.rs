//! In-process catalog implementation.
//!
//! [`InMemoryCatalog`] mirrors the behaviour the handlers depend on:
//!
//! - form types are keyed by `(domain, name)`; every upsert bumps the revision
//! - glossaries and terms receive server-generated ids
//! - a repeated client token returns the entity created by the first call
//! - enabled entities cannot be deleted, and neither can a glossary that
//!   still owns terms
//!
//! # Example
//!
//! ```rust
//! use datazone_resources::catalog::{CatalogClient, ClientToken, CreateGlossaryInput, EntityStatus, InMemoryCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = InMemoryCatalog::new();
//! let id = catalog
//!     .create_glossary(&CreateGlossaryInput {
//!         client_token: ClientToken::generate(),
//!         domain_identifier: "dzd_1".to_string(),
//!         owning_project_identifier: "prj_1".to_string(),
//!         name: "Finance".to_string(),
//!         description: String::new(),
//!         status: EntityStatus::Enabled,
//!     })
//!     .await?;
//! assert!(catalog.glossary(&id).await.is_some());
//! # Ok(())
//! # }
//! ```

use super::{
    CatalogClient, CatalogOperation, ClientToken, CreateGlossaryInput, CreateGlossaryTermInput,
    EntityStatus, FormTypeInput, FormTypeRevision, UpdateGlossaryInput, UpdateGlossaryTermInput,
};
use crate::error::{RemoteCallError, RemoteResult};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures raised by the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InMemoryCatalogError {
    #[error("{entity} '{identifier}' not found in domain '{domain}'")]
    NotFound {
        entity: &'static str,
        identifier: String,
        domain: String,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl InMemoryCatalogError {
    fn not_found(entity: &'static str, identifier: &str, domain: &str) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.to_string(),
            domain: domain.to_string(),
        }
    }

    fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    fn during(self, operation: CatalogOperation) -> RemoteCallError {
        RemoteCallError::new(operation, self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub domain_identifier: String,
    pub owning_project_identifier: String,
    pub name: String,
    pub description: String,
    pub status: EntityStatus,
    pub model_smithy: String,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryRecord {
    pub id: String,
    pub domain_identifier: String,
    pub owning_project_identifier: String,
    pub name: String,
    pub description: String,
    pub status: EntityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryTermRecord {
    pub id: String,
    pub domain_identifier: String,
    pub glossary_identifier: String,
    pub name: String,
    pub status: EntityStatus,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}

/// Entity counts for debugging and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InMemoryCatalogStats {
    pub form_types: usize,
    pub glossaries: usize,
    pub glossary_terms: usize,
}

#[derive(Debug, Default)]
struct CatalogState {
    // (domain, name) -> form
    forms: HashMap<(String, String), FormRecord>,
    glossaries: HashMap<String, GlossaryRecord>,
    terms: HashMap<String, GlossaryTermRecord>,
    // client token -> id returned for it
    tokens: HashMap<ClientToken, String>,
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn form(&self, domain_identifier: &str, name: &str) -> Option<FormRecord> {
        let state = self.state.read().await;
        state
            .forms
            .get(&(domain_identifier.to_string(), name.to_string()))
            .cloned()
    }

    pub async fn glossary(&self, identifier: &str) -> Option<GlossaryRecord> {
        self.state.read().await.glossaries.get(identifier).cloned()
    }

    pub async fn glossary_term(&self, identifier: &str) -> Option<GlossaryTermRecord> {
        self.state.read().await.terms.get(identifier).cloned()
    }

    pub async fn stats(&self) -> InMemoryCatalogStats {
        let state = self.state.read().await;
        InMemoryCatalogStats {
            form_types: state.forms.len(),
            glossaries: state.glossaries.len(),
            glossary_terms: state.terms.len(),
        }
    }

    fn generate_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

impl CatalogClient for InMemoryCatalog {
    async fn upsert_form_type(&self, input: &FormTypeInput) -> RemoteResult<FormTypeRevision> {
        let mut state = self.state.write().await;
        let key = (input.domain_identifier.clone(), input.name.clone());
        let revision = state.forms.get(&key).map_or(1, |existing| existing.revision + 1);

        state.forms.insert(
            key,
            FormRecord {
                domain_identifier: input.domain_identifier.clone(),
                owning_project_identifier: input.owning_project_identifier.clone(),
                name: input.name.clone(),
                description: input.description.clone(),
                status: input.status,
                model_smithy: input.model_smithy.clone(),
                revision,
            },
        );

        Ok(FormTypeRevision {
            name: input.name.clone(),
            revision: revision.to_string(),
        })
    }

    async fn delete_form_type(&self, domain_identifier: &str, name: &str) -> RemoteResult<()> {
        let operation = CatalogOperation::DeleteFormType;
        let mut state = self.state.write().await;
        let key = (domain_identifier.to_string(), name.to_string());

        match state.forms.get(&key) {
            None => Err(InMemoryCatalogError::not_found("Form type", name, domain_identifier)
                .during(operation)),
            Some(form) if form.status == EntityStatus::Enabled => Err(
                InMemoryCatalogError::conflict(format!("form type '{}' is still enabled", name))
                    .during(operation),
            ),
            Some(_) => {
                state.forms.remove(&key);
                Ok(())
            }
        }
    }

    async fn create_glossary(&self, input: &CreateGlossaryInput) -> RemoteResult<String> {
        let operation = CatalogOperation::CreateGlossary;
        let mut state = self.state.write().await;

        if let Some(id) = state.tokens.get(&input.client_token) {
            return Ok(id.clone());
        }
        if state
            .glossaries
            .values()
            .any(|g| g.domain_identifier == input.domain_identifier && g.name == input.name)
        {
            return Err(InMemoryCatalogError::conflict(format!(
                "glossary '{}' already exists in domain '{}'",
                input.name, input.domain_identifier
            ))
            .during(operation));
        }

        let id = Self::generate_id();
        state.glossaries.insert(
            id.clone(),
            GlossaryRecord {
                id: id.clone(),
                domain_identifier: input.domain_identifier.clone(),
                owning_project_identifier: input.owning_project_identifier.clone(),
                name: input.name.clone(),
                description: input.description.clone(),
                status: input.status,
            },
        );
        state.tokens.insert(input.client_token.clone(), id.clone());
        Ok(id)
    }

    async fn update_glossary(&self, input: &UpdateGlossaryInput) -> RemoteResult<()> {
        let mut state = self.state.write().await;
        let glossary = state
            .glossaries
            .get_mut(&input.identifier)
            .filter(|g| g.domain_identifier == input.domain_identifier)
            .ok_or_else(|| {
                InMemoryCatalogError::not_found(
                    "Glossary",
                    &input.identifier,
                    &input.domain_identifier,
                )
                .during(CatalogOperation::UpdateGlossary)
            })?;

        glossary.name = input.name.clone();
        glossary.description = input.description.clone();
        glossary.status = input.status;
        Ok(())
    }

    async fn delete_glossary(&self, domain_identifier: &str, identifier: &str) -> RemoteResult<()> {
        let operation = CatalogOperation::DeleteGlossary;
        let mut state = self.state.write().await;

        let glossary = state
            .glossaries
            .get(identifier)
            .filter(|g| g.domain_identifier == domain_identifier)
            .ok_or_else(|| {
                InMemoryCatalogError::not_found("Glossary", identifier, domain_identifier)
                    .during(operation)
            })?;

        if glossary.status == EntityStatus::Enabled {
            return Err(InMemoryCatalogError::conflict(format!(
                "glossary '{}' is still enabled",
                identifier
            ))
            .during(operation));
        }
        let term_count = state
            .terms
            .values()
            .filter(|t| t.glossary_identifier == identifier)
            .count();
        if term_count > 0 {
            return Err(InMemoryCatalogError::conflict(format!(
                "glossary '{}' still has {} terms",
                identifier, term_count
            ))
            .during(operation));
        }

        state.glossaries.remove(identifier);
        Ok(())
    }

    async fn create_glossary_term(&self, input: &CreateGlossaryTermInput) -> RemoteResult<String> {
        let operation = CatalogOperation::CreateGlossaryTerm;
        let mut state = self.state.write().await;

        if let Some(id) = state.tokens.get(&input.client_token) {
            return Ok(id.clone());
        }
        let fields = &input.fields;
        let name = fields.name.clone().ok_or_else(|| {
            InMemoryCatalogError::InvalidInput {
                message: "glossary term name is required".to_string(),
            }
            .during(operation)
        })?;
        if !state.glossaries.contains_key(&input.glossary_identifier) {
            return Err(InMemoryCatalogError::not_found(
                "Glossary",
                &input.glossary_identifier,
                &input.domain_identifier,
            )
            .during(operation));
        }
        if state
            .terms
            .values()
            .any(|t| t.glossary_identifier == input.glossary_identifier && t.name == name)
        {
            return Err(InMemoryCatalogError::conflict(format!(
                "term '{}' already exists in glossary '{}'",
                name, input.glossary_identifier
            ))
            .during(operation));
        }

        let id = Self::generate_id();
        state.terms.insert(
            id.clone(),
            GlossaryTermRecord {
                id: id.clone(),
                domain_identifier: input.domain_identifier.clone(),
                glossary_identifier: input.glossary_identifier.clone(),
                name,
                status: fields.status.unwrap_or(EntityStatus::Enabled),
                short_description: fields.short_description.clone(),
                long_description: fields.long_description.clone(),
            },
        );
        state.tokens.insert(input.client_token.clone(), id.clone());
        Ok(id)
    }

    async fn update_glossary_term(&self, input: &UpdateGlossaryTermInput) -> RemoteResult<()> {
        let mut state = self.state.write().await;
        let term = state
            .terms
            .get_mut(&input.identifier)
            .filter(|t| t.domain_identifier == input.domain_identifier)
            .ok_or_else(|| {
                InMemoryCatalogError::not_found(
                    "Glossary term",
                    &input.identifier,
                    &input.domain_identifier,
                )
                .during(CatalogOperation::UpdateGlossaryTerm)
            })?;

        // Omitted fields leave the stored value unchanged.
        let fields = &input.fields;
        term.glossary_identifier = input.glossary_identifier.clone();
        if let Some(name) = &fields.name {
            term.name = name.clone();
        }
        if let Some(status) = fields.status {
            term.status = status;
        }
        if let Some(short) = &fields.short_description {
            term.short_description = Some(short.clone());
        }
        if let Some(long) = &fields.long_description {
            term.long_description = Some(long.clone());
        }
        Ok(())
    }

    async fn delete_glossary_term(
        &self,
        domain_identifier: &str,
        identifier: &str,
    ) -> RemoteResult<()> {
        let operation = CatalogOperation::DeleteGlossaryTerm;
        let mut state = self.state.write().await;

        match state
            .terms
            .get(identifier)
            .filter(|t| t.domain_identifier == domain_identifier)
        {
            None => Err(
                InMemoryCatalogError::not_found("Glossary term", identifier, domain_identifier)
                    .during(operation),
            ),
            Some(term) if term.status == EntityStatus::Enabled => Err(
                InMemoryCatalogError::conflict(format!(
                    "glossary term '{}' is still enabled",
                    identifier
                ))
                .during(operation),
            ),
            Some(_) => {
                state.terms.remove(identifier);
                Ok(())
            }
        }
    }
}
