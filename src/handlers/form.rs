//! Form type custom resource.
//!
//! Form types are keyed by name and the catalog's create call replaces an
//! existing form of the same name, so Create and Update are one upsert. The
//! form name doubles as the physical resource id.
//!
//! Delete disables the form through the same upsert and then deletes it.
//! Either step failing fails the event.

use super::{CustomResourceHandler, ErrorPolicy, disable_then_delete};
use crate::catalog::{CatalogClient, EntityStatus, FormTypeInput, FormTypeRevision};
use crate::error::{HandlerResult, ValidationResult};
use crate::event::{LifecycleEvent, LifecycleResult, RequestType};
use crate::properties::{FieldSpec, ResourceSchema};
use log::{error, info};

pub const DOMAIN_IDENTIFIER: &str = "DomainIdentifier";
pub const PROJECT_IDENTIFIER: &str = "ProjectIdentifier";
pub const FORM_NAME: &str = "FormName";
pub const FORM_DESCRIPTION: &str = "FormDescription";
pub const FORM_STATUS: &str = "FormStatus";
pub const FORM_MODEL_SMITHY: &str = "FormModelSmithy";

pub const FORM_SCHEMA: ResourceSchema = ResourceSchema {
    resource: "Form",
    label_key: FORM_NAME,
    fields: &[
        FieldSpec::required(DOMAIN_IDENTIFIER),
        FieldSpec::required(PROJECT_IDENTIFIER),
        FieldSpec::required(FORM_NAME),
        FieldSpec::required(FORM_MODEL_SMITHY),
        FieldSpec::defaulted(FORM_STATUS, "ENABLED"),
        FieldSpec::defaulted(FORM_DESCRIPTION, ""),
    ],
};

/// Resolved form properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FormProperties {
    pub domain_identifier: String,
    pub project_identifier: String,
    pub name: String,
    pub description: String,
    /// Raw `FormStatus`, parsed only when a request is built from it
    pub requested_status: String,
    pub model_smithy: String,
}

impl FormProperties {
    pub fn from_event(event: &LifecycleEvent) -> ValidationResult<Self> {
        let mut resolved = FORM_SCHEMA.resolve(&event.resource_properties)?;

        Ok(Self {
            domain_identifier: resolved.take_required(DOMAIN_IDENTIFIER)?,
            project_identifier: resolved.take_required(PROJECT_IDENTIFIER)?,
            name: resolved.take_required(FORM_NAME)?,
            description: resolved.take(FORM_DESCRIPTION).unwrap_or_default(),
            requested_status: resolved.take_required(FORM_STATUS)?,
            model_smithy: resolved.take_required(FORM_MODEL_SMITHY)?,
        })
    }

    /// Status requested by the template. Delete never reads it.
    pub fn status(&self) -> ValidationResult<EntityStatus> {
        EntityStatus::parse(FORM_STATUS, &self.requested_status)
    }

    /// Names the form in teardown log lines.
    fn target(&self) -> String {
        format!(
            "Form {} in domain {} project {}",
            self.name, self.domain_identifier, self.project_identifier
        )
    }

    fn input(&self, status: EntityStatus) -> FormTypeInput {
        FormTypeInput {
            domain_identifier: self.domain_identifier.clone(),
            owning_project_identifier: self.project_identifier.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status,
            model_smithy: self.model_smithy.clone(),
        }
    }
}

/// Handler for `Custom::Form` resources.
pub struct FormHandler<C: CatalogClient> {
    catalog: C,
}

impl<C: CatalogClient> FormHandler<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    async fn upsert(
        &self,
        props: &FormProperties,
        status: EntityStatus,
    ) -> HandlerResult<FormTypeRevision> {
        info!(
            "Creating Form {} for domain {} and project {}, status {}",
            props.name, props.domain_identifier, props.project_identifier, status
        );
        self.catalog
            .upsert_form_type(&props.input(status))
            .await
            .map_err(|e| {
                error!(
                    "Error creating Form {} for domain {} and project {}: {}",
                    props.name, props.domain_identifier, props.project_identifier, e
                );
                e.into()
            })
    }
}

impl<C: CatalogClient> CustomResourceHandler for FormHandler<C> {
    const RESOURCE: &'static str = "Form";

    async fn handle(&self, event: &LifecycleEvent) -> HandlerResult<LifecycleResult> {
        let props = FormProperties::from_event(event).inspect_err(|e| {
            error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
        })?;

        match event.request_type {
            RequestType::Create | RequestType::Update => {
                let status = props.status().inspect_err(|e| {
                    error!("Rejecting {} for {}: {}", event.context(), Self::RESOURCE, e);
                })?;
                let revision = self.upsert(&props, status).await?;
                info!(
                    "Form {} in domain {} is at revision {}",
                    revision.name, props.domain_identifier, revision.revision
                );
                Ok(LifecycleResult::with_physical_resource_id(&props.name)
                    .data("Name", revision.name)
                    .data("Revision", revision.revision))
            }
            RequestType::Delete => {
                disable_then_delete(
                    &props.target(),
                    ErrorPolicy::Propagate,
                    async {
                        self.catalog
                            .upsert_form_type(&props.input(EntityStatus::Disabled))
                            .await
                            .map(|_| ())
                    },
                    self.catalog
                        .delete_form_type(&props.domain_identifier, &props.name),
                )
                .await?;
                Ok(LifecycleResult::success())
            }
        }
    }
}
