//! [`CatalogClient`] backed by Amazon DataZone.
//!
//! Each method issues exactly one SDK call. SDK errors are wrapped in
//! [`RemoteCallError`] tagged with the operation that produced them.

use super::{
    CatalogClient, CatalogOperation, CreateGlossaryInput, CreateGlossaryTermInput, EntityStatus,
    FormTypeInput, FormTypeRevision, UpdateGlossaryInput, UpdateGlossaryTermInput,
};
use crate::config::HandlerConfig;
use crate::error::{RemoteCallError, RemoteResult};
use aws_sdk_datazone::Client;
use aws_sdk_datazone::types::{FormTypeStatus, GlossaryStatus, GlossaryTermStatus, Model};
use log::debug;

/// DataZone control-plane client.
///
/// Built once per process and reused for every event the process handles.
#[derive(Debug, Clone)]
pub struct DataZoneCatalog {
    client: Client,
}

impl DataZoneCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from shared AWS configuration, honouring the endpoint
    /// override in `config`.
    pub fn from_conf(sdk_config: &aws_config::SdkConfig, config: &HandlerConfig) -> Self {
        let mut builder = aws_sdk_datazone::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.endpoint_url {
            debug!("Using DataZone endpoint override {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

fn form_type_status(status: EntityStatus) -> FormTypeStatus {
    FormTypeStatus::from(status.as_str())
}

fn glossary_status(status: EntityStatus) -> GlossaryStatus {
    GlossaryStatus::from(status.as_str())
}

fn glossary_term_status(status: EntityStatus) -> GlossaryTermStatus {
    GlossaryTermStatus::from(status.as_str())
}

impl CatalogClient for DataZoneCatalog {
    async fn upsert_form_type(&self, input: &FormTypeInput) -> RemoteResult<FormTypeRevision> {
        let output = self
            .client
            .create_form_type()
            .domain_identifier(&input.domain_identifier)
            .owning_project_identifier(&input.owning_project_identifier)
            .name(&input.name)
            .description(&input.description)
            .status(form_type_status(input.status))
            .model(Model::Smithy(input.model_smithy.clone()))
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::CreateFormType, e))?;

        Ok(FormTypeRevision {
            name: output.name().to_string(),
            revision: output.revision().to_string(),
        })
    }

    async fn delete_form_type(&self, domain_identifier: &str, name: &str) -> RemoteResult<()> {
        self.client
            .delete_form_type()
            .domain_identifier(domain_identifier)
            .form_type_identifier(name)
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::DeleteFormType, e))?;
        Ok(())
    }

    async fn create_glossary(&self, input: &CreateGlossaryInput) -> RemoteResult<String> {
        let output = self
            .client
            .create_glossary()
            .client_token(input.client_token.as_str())
            .domain_identifier(&input.domain_identifier)
            .owning_project_identifier(&input.owning_project_identifier)
            .name(&input.name)
            .description(&input.description)
            .status(glossary_status(input.status))
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::CreateGlossary, e))?;

        Ok(output.id().to_string())
    }

    async fn update_glossary(&self, input: &UpdateGlossaryInput) -> RemoteResult<()> {
        self.client
            .update_glossary()
            .client_token(input.client_token.as_str())
            .domain_identifier(&input.domain_identifier)
            .identifier(&input.identifier)
            .name(&input.name)
            .description(&input.description)
            .status(glossary_status(input.status))
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::UpdateGlossary, e))?;
        Ok(())
    }

    async fn delete_glossary(&self, domain_identifier: &str, identifier: &str) -> RemoteResult<()> {
        self.client
            .delete_glossary()
            .domain_identifier(domain_identifier)
            .identifier(identifier)
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::DeleteGlossary, e))?;
        Ok(())
    }

    async fn create_glossary_term(&self, input: &CreateGlossaryTermInput) -> RemoteResult<String> {
        let fields = &input.fields;
        let output = self
            .client
            .create_glossary_term()
            .client_token(input.client_token.as_str())
            .domain_identifier(&input.domain_identifier)
            .glossary_identifier(&input.glossary_identifier)
            .set_name(fields.name.clone())
            .set_status(fields.status.map(glossary_term_status))
            .set_short_description(fields.short_description.clone())
            .set_long_description(fields.long_description.clone())
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::CreateGlossaryTerm, e))?;

        Ok(output.id().to_string())
    }

    async fn update_glossary_term(&self, input: &UpdateGlossaryTermInput) -> RemoteResult<()> {
        let fields = &input.fields;
        self.client
            .update_glossary_term()
            .domain_identifier(&input.domain_identifier)
            .glossary_identifier(&input.glossary_identifier)
            .identifier(&input.identifier)
            .set_name(fields.name.clone())
            .set_status(fields.status.map(glossary_term_status))
            .set_short_description(fields.short_description.clone())
            .set_long_description(fields.long_description.clone())
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::UpdateGlossaryTerm, e))?;
        Ok(())
    }

    async fn delete_glossary_term(
        &self,
        domain_identifier: &str,
        identifier: &str,
    ) -> RemoteResult<()> {
        self.client
            .delete_glossary_term()
            .domain_identifier(domain_identifier)
            .identifier(identifier)
            .send()
            .await
            .map_err(|e| RemoteCallError::new(CatalogOperation::DeleteGlossaryTerm, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(form_type_status(EntityStatus::Enabled), FormTypeStatus::Enabled);
        assert_eq!(glossary_status(EntityStatus::Disabled), GlossaryStatus::Disabled);
        assert_eq!(
            glossary_term_status(EntityStatus::Enabled),
            GlossaryTermStatus::Enabled
        );
    }
}
