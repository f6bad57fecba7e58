//! Glossary term custom resource.
//!
//! Same lifecycle as glossaries, with two differences: descriptions have no
//! default, and every create/update request is sparse. An absent or empty
//! description is left out of the request rather than sent as `""`, because
//! the term API reads an explicit empty string as "clear this field".
//!
//! `TermRelations` is accepted and ignored.

use super::{CustomResourceHandler, ErrorPolicy, disable_then_delete};
use crate::catalog::{
    CatalogClient, ClientToken, CreateGlossaryTermInput, EntityStatus, GlossaryTermFields,
    UpdateGlossaryTermInput,
};
use crate::error::{HandlerResult, ValidationResult};
use crate::event::{LifecycleEvent, LifecycleResult, RequestType};
use crate::properties::{FieldSpec, ResourceSchema};
use log::{debug, error, info};

pub const DOMAIN_IDENTIFIER: &str = "DomainIdentifier";
pub const GLOSSARY_IDENTIFIER: &str = "GlossaryIdentifier";
pub const NAME: &str = "Name";
pub const STATUS: &str = "Status";
pub const SHORT_DESCRIPTION: &str = "ShortDescription";
pub const LONG_DESCRIPTION: &str = "LongDescription";
pub const TERM_RELATIONS: &str = "TermRelations";

pub const GLOSSARY_TERM_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "Glossary Term",
    label_key: NAME,
    fields: &[
        FieldSpec::required(DOMAIN_IDENTIFIER),
        FieldSpec::required(GLOSSARY_IDENTIFIER),
        FieldSpec::required(NAME),
        FieldSpec::defaulted(STATUS, "ENABLED"),
        FieldSpec::optional(SHORT_DESCRIPTION),
        FieldSpec::optional(LONG_DESCRIPTION),
        FieldSpec::ignored(TERM_RELATIONS),
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryTermProperties {
    pub domain_identifier: String,
    pub glossary_identifier: String,
    pub name: String,
    /// Raw `Status`, parsed only for Create and Update
    pub requested_status: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}

impl GlossaryTermProperties {
    pub fn from_event(event: &LifecycleEvent) -> ValidationResult<Self> {
        let mut resolved = GLOSSARY_TERM_SCHEMA.resolve(&event.resource_properties)?;

        Ok(Self {
            domain_identifier: resolved.take_required(DOMAIN_IDENTIFIER)?,
            glossary_identifier: resolved.take_required(GLOSSARY_IDENTIFIER)?,
            name: resolved.take_required(NAME)?,
            requested_status: resolved.take_required(STATUS)?,
            short_description: resolved.take(SHORT_DESCRIPTION),
            long_description: resolved.take(LONG_DESCRIPTION),
        })
    }

    pub fn status(&self) -> ValidationResult<EntityStatus> {
        EntityStatus::parse(STATUS, &self.requested_status)
    }

    /// Sparse attribute set for a create or update call.
    pub fn fields(&self, status: EntityStatus) -> GlossaryTermFields {
        GlossaryTermFields::default()
            .name(Some(self.name.as_str()))
            .status(Some(status))
            .short_description(self.short_description.as_deref())
            .long_description(self.long_description.as_deref())
    }

    fn update(&self, identifier: &str, status: EntityStatus) -> UpdateGlossaryTermInput {
        UpdateGlossaryTermInput {
            domain_identifier: self.domain_identifier.clone(),
            glossary_identifier: self.glossary_identifier.clone(),
            identifier: identifier.to_string(),
            fields: self.fields(status),
        }
    }
}

/// Handler for `Custom::GlossaryTerm` resources.
pub struct GlossaryTermHandler<C: CatalogClient> {
    catalog: C,
}

impl<C: CatalogClient> GlossaryTermHandler<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    async fn create(
        &self,
        props: &GlossaryTermProperties,
        status: EntityStatus,
    ) -> HandlerResult<String> {
        let input = CreateGlossaryTermInput {
            client_token: ClientToken::generate(),
            domain_identifier: props.domain_identifier.clone(),
            glossary_identifier: props.glossary_identifier.clone(),
            fields: props.fields(status),
        };

        match self.catalog.create_glossary_term(&input).await {
            Ok(id) => {
                info!(
                    "Created glossary term {} for domain {} glossary {}, received id {}",
                    props.name, props.domain_identifier, props.glossary_identifier, id
                );
                Ok(id)
            }
            Err(e) => {
                error!(
                    "Error creating glossary term {} for domain {} glossary {}: {}",
                    props.name, props.domain_identifier, props.glossary_identifier, e
                );
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        props: &GlossaryTermProperties,
        identifier: &str,
        status: EntityStatus,
    ) -> HandlerResult<()> {
        match self
            .catalog
            .update_glossary_term(&props.update(identifier, status))
            .await
        {
            Ok(()) => {
                info!(
                    "Updated glossary term {} with id {} for domain {}",
                    props.name, identifier, props.domain_identifier
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "Error updating glossary term {} with id {} for domain {} glossary {}: {}",
                    props.name, identifier, props.domain_identifier, props.glossary_identifier, e
                );
                Err(e.into())
            }
        }
    }
}

impl<C: CatalogClient> CustomResourceHandler for GlossaryTermHandler<C> {
    const RESOURCE: &'static str = "Glossary Term";

    async fn handle(&self, event: &LifecycleEvent) -> HandlerResult<LifecycleResult> {
        let props = GlossaryTermProperties::from_event(event).inspect_err(|e| {
            error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
        })?;
        debug!("Resolved glossary term properties: {:?}", props);

        match event.request_type {
            RequestType::Create => {
                let status = props.status().inspect_err(|e| {
                    error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
                })?;
                let id = self.create(&props, status).await?;
                Ok(LifecycleResult::with_physical_resource_id(&id).data("GlossaryTermId", id))
            }
            RequestType::Update => {
                let status = props.status().inspect_err(|e| {
                    error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
                })?;
                let id = event.require_physical_resource_id(Self::RESOURCE)?;
                self.update(&props, id, status).await?;
                // Attribute name kept as GlossaryId; templates already read it.
                Ok(LifecycleResult::with_physical_resource_id(id).data("GlossaryId", id))
            }
            RequestType::Delete => {
                let id = event.require_physical_resource_id(Self::RESOURCE)?;
                let target = format!(
                    "glossary term {} ({}) in domain {} glossary {}",
                    props.name, id, props.domain_identifier, props.glossary_identifier
                );
                disable_then_delete(
                    &target,
                    ErrorPolicy::SuppressAndLog,
                    self.catalog
                        .update_glossary_term(&props.update(id, EntityStatus::Disabled)),
                    self.catalog
                        .delete_glossary_term(&props.domain_identifier, id),
                )
                .await?;
                Ok(LifecycleResult::success())
            }
        }
    }
}
