//! Glossary custom resource.
//!
//! The catalog assigns the glossary id on Create; that id becomes the physical
//! resource id and is replayed on every later Update and Delete.
//!
//! Teardown is best-effort: a glossary the catalog refuses to delete (for
//! instance because it still owns terms) is left disabled and the event still
//! succeeds, so stack deletion is never blocked on it.

use super::{CustomResourceHandler, ErrorPolicy, disable_then_delete};
use crate::catalog::{
    CatalogClient, ClientToken, CreateGlossaryInput, EntityStatus, UpdateGlossaryInput,
};
use crate::error::{HandlerResult, ValidationResult};
use crate::event::{LifecycleEvent, LifecycleResult, RequestType};
use crate::properties::{FieldSpec, ResourceSchema};
use log::{error, info};

pub const DOMAIN_IDENTIFIER: &str = "DomainIdentifier";
pub const OWNING_PROJECT_IDENTIFIER: &str = "OwningProjectIdentifier";
pub const GLOSSARY_NAME: &str = "GlossaryName";
pub const GLOSSARY_STATUS: &str = "GlossaryStatus";
pub const GLOSSARY_DESCRIPTION: &str = "GlossaryDescription";

pub const GLOSSARY_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "Glossary",
    label_key: GLOSSARY_NAME,
    fields: &[
        FieldSpec::required(DOMAIN_IDENTIFIER),
        FieldSpec::required(OWNING_PROJECT_IDENTIFIER),
        FieldSpec::required(GLOSSARY_NAME),
        FieldSpec::defaulted(GLOSSARY_STATUS, "ENABLED"),
        FieldSpec::defaulted(GLOSSARY_DESCRIPTION, ""),
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryProperties {
    pub domain_identifier: String,
    pub owning_project_identifier: String,
    pub name: String,
    pub description: String,
    /// Raw `GlossaryStatus`, parsed only for Create and Update
    pub requested_status: String,
}

impl GlossaryProperties {
    pub fn from_event(event: &LifecycleEvent) -> ValidationResult<Self> {
        let mut resolved = GLOSSARY_SCHEMA.resolve(&event.resource_properties)?;

        Ok(Self {
            domain_identifier: resolved.take_required(DOMAIN_IDENTIFIER)?,
            owning_project_identifier: resolved.take_required(OWNING_PROJECT_IDENTIFIER)?,
            name: resolved.take_required(GLOSSARY_NAME)?,
            description: resolved.take(GLOSSARY_DESCRIPTION).unwrap_or_default(),
            requested_status: resolved.take_required(GLOSSARY_STATUS)?,
        })
    }

    pub fn status(&self) -> ValidationResult<EntityStatus> {
        EntityStatus::parse(GLOSSARY_STATUS, &self.requested_status)
    }

    fn update(&self, identifier: &str, status: EntityStatus) -> UpdateGlossaryInput {
        UpdateGlossaryInput {
            client_token: ClientToken::generate(),
            domain_identifier: self.domain_identifier.clone(),
            identifier: identifier.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            status,
        }
    }
}

/// Handler for `Custom::Glossary` resources.
pub struct GlossaryHandler<C: CatalogClient> {
    catalog: C,
}

impl<C: CatalogClient> GlossaryHandler<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    async fn create(
        &self,
        props: &GlossaryProperties,
        status: EntityStatus,
    ) -> HandlerResult<String> {
        info!(
            "Creating new glossary with name {} for domain {} project {}",
            props.name, props.domain_identifier, props.owning_project_identifier
        );
        let input = CreateGlossaryInput {
            client_token: ClientToken::generate(),
            domain_identifier: props.domain_identifier.clone(),
            owning_project_identifier: props.owning_project_identifier.clone(),
            name: props.name.clone(),
            description: props.description.clone(),
            status,
        };

        match self.catalog.create_glossary(&input).await {
            Ok(id) => {
                info!(
                    "Created glossary {} for domain {} project {}, received id {}",
                    props.name, props.domain_identifier, props.owning_project_identifier, id
                );
                Ok(id)
            }
            Err(e) => {
                error!(
                    "Error creating glossary {} for domain {} project {}: {}",
                    props.name, props.domain_identifier, props.owning_project_identifier, e
                );
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        props: &GlossaryProperties,
        identifier: &str,
        status: EntityStatus,
    ) -> HandlerResult<()> {
        match self
            .catalog
            .update_glossary(&props.update(identifier, status))
            .await
        {
            Ok(()) => {
                info!(
                    "Updated glossary {} with id {} for domain {}",
                    props.name, identifier, props.domain_identifier
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "Error updating glossary {} with id {} for domain {}: {}",
                    props.name, identifier, props.domain_identifier, e
                );
                Err(e.into())
            }
        }
    }
}

impl<C: CatalogClient> CustomResourceHandler for GlossaryHandler<C> {
    const RESOURCE: &'static str = "Glossary";

    async fn handle(&self, event: &LifecycleEvent) -> HandlerResult<LifecycleResult> {
        let props = GlossaryProperties::from_event(event).inspect_err(|e| {
            error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
        })?;

        match event.request_type {
            RequestType::Create => {
                let status = props.status().inspect_err(|e| {
                    error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
                })?;
                let id = self.create(&props, status).await?;
                Ok(LifecycleResult::with_physical_resource_id(&id).data("GlossaryId", id))
            }
            RequestType::Update => {
                let status = props.status().inspect_err(|e| {
                    error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
                })?;
                let id = event.require_physical_resource_id(Self::RESOURCE)?;
                self.update(&props, id, status).await?;
                Ok(LifecycleResult::with_physical_resource_id(id).data("GlossaryId", id))
            }
            RequestType::Delete => {
                let id = event.require_physical_resource_id(Self::RESOURCE)?;
                let target = format!(
                    "glossary {} ({}) in domain {} project {}",
                    props.name, id, props.domain_identifier, props.owning_project_identifier
                );
                disable_then_delete(
                    &target,
                    ErrorPolicy::SuppressAndLog,
                    self.catalog
                        .update_glossary(&props.update(id, EntityStatus::Disabled)),
                    self.catalog.delete_glossary(&props.domain_identifier, id),
                )
                .await?;
                Ok(LifecycleResult::success())
            }
        }
    }
}
