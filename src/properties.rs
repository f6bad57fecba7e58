//! Declarative resolution of resource properties.
//!
//! Each managed entity describes its properties as a static [`ResourceSchema`]:
//! a table of `(key, requirement)` pairs. Resolution reads the raw
//! `ResourceProperties` map, applies defaults, and reports every missing
//! required key at once.
//!
//! Values are "falsy" when they are `null`, an empty string, `false` or zero.
//! Falsy values are treated exactly like absent keys, both here and when
//! building sparse catalog requests through [`present`].

use crate::error::{ValidationError, ValidationResult};
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// How a property participates in resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must be present and non-empty
    Required,
    /// Replaced by the given value when absent
    Default(&'static str),
    /// Kept only when present
    Optional,
    /// Accepted but never read
    Ignored,
}

/// One entry of a resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub requirement: Requirement,
}

impl FieldSpec {
    pub const fn required(key: &'static str) -> Self {
        Self {
            key,
            requirement: Requirement::Required,
        }
    }

    pub const fn defaulted(key: &'static str, default: &'static str) -> Self {
        Self {
            key,
            requirement: Requirement::Default(default),
        }
    }

    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            requirement: Requirement::Optional,
        }
    }

    pub const fn ignored(key: &'static str) -> Self {
        Self {
            key,
            requirement: Requirement::Ignored,
        }
    }
}

/// Property table for one entity type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Entity name used in errors and logs
    pub resource: &'static str,
    /// Key whose value names the entity in log lines
    pub label_key: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ResourceSchema {
    /// Resolve raw properties against this schema.
    ///
    /// Keys not listed in the schema (such as the `ServiceToken` CloudFormation
    /// copies into every property map) are skipped.
    pub fn resolve(&self, properties: &Map<String, Value>) -> ValidationResult<ResolvedProperties> {
        let mut values = BTreeMap::new();
        let mut missing = Vec::new();
        let mut defaulted = Vec::new();

        for field in self.fields {
            if field.requirement == Requirement::Ignored {
                if properties.get(field.key).is_some_and(|v| !v.is_null()) {
                    debug!("{} property '{}' is not supported, ignoring it", self.resource, field.key);
                }
                continue;
            }

            match (scalar_value(field.key, properties.get(field.key))?, field.requirement) {
                (Some(value), _) => {
                    values.insert(field.key, value);
                }
                (None, Requirement::Required) => missing.push(field.key),
                (None, Requirement::Default(default)) => {
                    values.insert(field.key, default.to_string());
                    defaulted.push((field.key, default));
                }
                (None, _) => {}
            }
        }

        if !missing.is_empty() {
            return Err(ValidationError::missing_required(self.resource, missing));
        }

        let label = values.get(self.label_key).map(String::as_str).unwrap_or_default();
        for (key, default) in defaulted {
            info!(
                "{} not specified for {} '{}', defaulting to '{}'",
                key, self.resource, label, default
            );
        }

        Ok(ResolvedProperties {
            resource: self.resource,
            values,
        })
    }
}

/// Properties that passed resolution, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperties {
    resource: &'static str,
    values: BTreeMap<&'static str, String>,
}

impl ResolvedProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Remove an optional property.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Remove a required or defaulted property.
    pub fn take_required(&mut self, key: &'static str) -> ValidationResult<String> {
        self.values
            .remove(key)
            .ok_or_else(|| ValidationError::missing_required(self.resource, vec![key]))
    }
}

/// Keep a value only when it is present and non-empty.
///
/// This is the filter applied to sparse catalog requests: a field that comes
/// back `None` is left out of the outbound payload entirely.
pub fn present<S: Into<String>>(value: Option<S>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.is_empty())
}

fn scalar_value(key: &'static str, value: Option<&Value>) -> ValidationResult<Option<String>> {
    let rendered = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Bool(b)) => (*b).then(|| b.to_string()),
        Some(Value::Number(n)) => {
            let zero = n.as_f64().is_some_and(|f| f == 0.0);
            (!zero).then(|| n.to_string())
        }
        Some(Value::Array(_)) => {
            return Err(ValidationError::InvalidPropertyType {
                property: key,
                actual: "array",
            });
        }
        Some(Value::Object(_)) => {
            return Err(ValidationError::InvalidPropertyType {
                property: key,
                actual: "object",
            });
        }
    };
    Ok(present(rendered))
}
