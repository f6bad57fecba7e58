//! Lifecycle events received from the orchestrator and the results handed back.
//!
//! Events follow the CloudFormation custom-resource envelope (PascalCase keys).
//! Only `RequestType`, `ResourceProperties` and `PhysicalResourceId` drive
//! behaviour; the remaining envelope fields are carried for log context.

use crate::error::{HandlerError, HandlerResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle verb of a custom-resource event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            RequestType::Create => "Create",
            RequestType::Update => "Update",
            RequestType::Delete => "Delete",
        };
        f.write_str(verb)
    }
}

/// A custom-resource lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub request_type: RequestType,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    /// Id returned by this handler on Create; present on Update and Delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
}

impl LifecycleEvent {
    fn new(request_type: RequestType, properties: Value) -> Self {
        let resource_properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            request_type,
            resource_properties,
            physical_resource_id: None,
            old_resource_properties: None,
            request_id: None,
            stack_id: None,
            logical_resource_id: None,
            resource_type: None,
            service_token: None,
        }
    }

    /// Build a Create event from a JSON object of resource properties.
    pub fn create(properties: Value) -> Self {
        Self::new(RequestType::Create, properties)
    }

    /// Build an Update event for an existing physical resource.
    pub fn update(physical_resource_id: impl Into<String>, properties: Value) -> Self {
        let mut event = Self::new(RequestType::Update, properties);
        event.physical_resource_id = Some(physical_resource_id.into());
        event
    }

    /// Build a Delete event for an existing physical resource.
    pub fn delete(physical_resource_id: impl Into<String>, properties: Value) -> Self {
        let mut event = Self::new(RequestType::Delete, properties);
        event.physical_resource_id = Some(physical_resource_id.into());
        event
    }

    /// Decode an event from its JSON envelope.
    pub fn from_json(payload: &str) -> HandlerResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The physical resource id carried by Update and Delete events.
    ///
    /// An empty id counts as missing.
    pub fn require_physical_resource_id(&self, resource: &'static str) -> HandlerResult<&str> {
        match self.physical_resource_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(HandlerError::MissingPhysicalResourceId {
                request_type: self.request_type.to_string(),
                resource,
            }),
        }
    }

    /// Log-friendly summary of the envelope.
    pub fn context(&self) -> EventContext<'_> {
        EventContext(self)
    }
}

/// Display adapter naming the event in log lines.
pub struct EventContext<'a>(&'a LifecycleEvent);

impl fmt::Display for EventContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        write!(f, "{}", event.request_type)?;
        if let Some(logical) = &event.logical_resource_id {
            write!(f, " {}", logical)?;
        }
        if let Some(physical) = &event.physical_resource_id {
            write!(f, " (physical id '{}')", physical)?;
        }
        if let Some(request_id) = &event.request_id {
            write!(f, " [request {}]", request_id)?;
        }
        Ok(())
    }
}

/// Outcome reported for a lifecycle event.
///
/// Failures are never represented here: a failed event is an `Err` from the
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    #[serde(rename = "SUCCESS")]
    Success,
}

/// Result handed back to the orchestrator.
///
/// Serializes as `{"status": "SUCCESS", "PhysicalResourceId": .., "Data": {..}}`
/// with absent optional keys omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleResult {
    pub status: ResultStatus,
    #[serde(
        rename = "PhysicalResourceId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub physical_resource_id: Option<String>,
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

impl LifecycleResult {
    /// A bare success, as reported for Delete events.
    pub fn success() -> Self {
        Self {
            status: ResultStatus::Success,
            physical_resource_id: None,
            data: None,
        }
    }

    /// A success that records the physical resource id.
    pub fn with_physical_resource_id(id: impl Into<String>) -> Self {
        Self {
            physical_resource_id: Some(id.into()),
            ..Self::success()
        }
    }

    /// Add an attribute exposed to the template through `Fn::GetAtt`.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a returned attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key).map(String::as_str)
    }
}
