//! Recording catalog client.
//!
//! Captures every request it receives, answers with canned identifiers, and
//! fails selected operations on demand.

use datazone_resources::catalog::{
    CatalogClient, CatalogOperation, CreateGlossaryInput, CreateGlossaryTermInput, FormTypeInput,
    FormTypeRevision, UpdateGlossaryInput, UpdateGlossaryTermInput,
};
use datazone_resources::error::{RemoteCallError, RemoteResult};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCall {
    UpsertFormType(FormTypeInput),
    DeleteFormType { domain: String, name: String },
    CreateGlossary(CreateGlossaryInput),
    UpdateGlossary(UpdateGlossaryInput),
    DeleteGlossary { domain: String, identifier: String },
    CreateGlossaryTerm(CreateGlossaryTermInput),
    UpdateGlossaryTerm(UpdateGlossaryTermInput),
    DeleteGlossaryTerm { domain: String, identifier: String },
}

impl CatalogCall {
    pub fn operation(&self) -> CatalogOperation {
        match self {
            CatalogCall::UpsertFormType(_) => CatalogOperation::CreateFormType,
            CatalogCall::DeleteFormType { .. } => CatalogOperation::DeleteFormType,
            CatalogCall::CreateGlossary(_) => CatalogOperation::CreateGlossary,
            CatalogCall::UpdateGlossary(_) => CatalogOperation::UpdateGlossary,
            CatalogCall::DeleteGlossary { .. } => CatalogOperation::DeleteGlossary,
            CatalogCall::CreateGlossaryTerm(_) => CatalogOperation::CreateGlossaryTerm,
            CatalogCall::UpdateGlossaryTerm(_) => CatalogOperation::UpdateGlossaryTerm,
            CatalogCall::DeleteGlossaryTerm { .. } => CatalogOperation::DeleteGlossaryTerm,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("simulated {0} failure")]
pub struct SimulatedFailure(CatalogOperation);

pub struct RecordingCatalog {
    calls: Mutex<Vec<CatalogCall>>,
    failing: HashSet<CatalogOperation>,
    created_id: String,
    revision: String,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            created_id: "id-1".to_string(),
            revision: "1".to_string(),
        }
    }

    /// Id returned by create calls.
    pub fn returning_id(mut self, id: &str) -> Self {
        self.created_id = id.to_string();
        self
    }

    /// Revision returned by form upserts.
    pub fn returning_revision(mut self, revision: &str) -> Self {
        self.revision = revision.to_string();
        self
    }

    pub fn failing_on(mut self, operation: CatalogOperation) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<CatalogOperation> {
        self.calls().iter().map(CatalogCall::operation).collect()
    }

    fn record<T>(&self, call: CatalogCall, reply: T) -> RemoteResult<T> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&operation) {
            return Err(RemoteCallError::new(operation, SimulatedFailure(operation)));
        }
        Ok(reply)
    }
}

impl CatalogClient for RecordingCatalog {
    async fn upsert_form_type(&self, input: &FormTypeInput) -> RemoteResult<FormTypeRevision> {
        let reply = FormTypeRevision {
            name: input.name.clone(),
            revision: self.revision.clone(),
        };
        self.record(CatalogCall::UpsertFormType(input.clone()), reply)
    }

    async fn delete_form_type(&self, domain_identifier: &str, name: &str) -> RemoteResult<()> {
        let call = CatalogCall::DeleteFormType {
            domain: domain_identifier.to_string(),
            name: name.to_string(),
        };
        self.record(call, ())
    }

    async fn create_glossary(&self, input: &CreateGlossaryInput) -> RemoteResult<String> {
        self.record(CatalogCall::CreateGlossary(input.clone()), self.created_id.clone())
    }

    async fn update_glossary(&self, input: &UpdateGlossaryInput) -> RemoteResult<()> {
        self.record(CatalogCall::UpdateGlossary(input.clone()), ())
    }

    async fn delete_glossary(&self, domain_identifier: &str, identifier: &str) -> RemoteResult<()> {
        let call = CatalogCall::DeleteGlossary {
            domain: domain_identifier.to_string(),
            identifier: identifier.to_string(),
        };
        self.record(call, ())
    }

    async fn create_glossary_term(&self, input: &CreateGlossaryTermInput) -> RemoteResult<String> {
        self.record(
            CatalogCall::CreateGlossaryTerm(input.clone()),
            self.created_id.clone(),
        )
    }

    async fn update_glossary_term(&self, input: &UpdateGlossaryTermInput) -> RemoteResult<()> {
        self.record(CatalogCall::UpdateGlossaryTerm(input.clone()), ())
    }

    async fn delete_glossary_term(
        &self,
        domain_identifier: &str,
        identifier: &str,
    ) -> RemoteResult<()> {
        let call = CatalogCall::DeleteGlossaryTerm {
            domain: domain_identifier.to_string(),
            identifier: identifier.to_string(),
        };
        self.record(call, ())
    }
}
