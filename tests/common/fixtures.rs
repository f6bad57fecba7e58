//! Resource property fixtures.
//!
//! Each function returns the minimal valid property set for an entity; tests
//! add or blank out keys from there.

use serde_json::{Value, json};

pub const DOMAIN: &str = "d1";
pub const PROJECT: &str = "p1";

pub fn form_properties() -> Value {
    json!({
        "DomainIdentifier": DOMAIN,
        "ProjectIdentifier": PROJECT,
        "FormName": "Form1",
        "FormModelSmithy": "m"
    })
}

pub fn glossary_properties() -> Value {
    json!({
        "DomainIdentifier": DOMAIN,
        "OwningProjectIdentifier": PROJECT,
        "GlossaryName": "Finance"
    })
}

pub fn glossary_term_properties(glossary_id: &str) -> Value {
    json!({
        "DomainIdentifier": DOMAIN,
        "GlossaryIdentifier": glossary_id,
        "Name": "Revenue"
    })
}

/// Copy of `properties` with `key` set to `value`.
pub fn with(properties: &Value, key: &str, value: Value) -> Value {
    let mut updated = properties.clone();
    updated[key] = value;
    updated
}

/// Copy of `properties` without `key`.
pub fn without(properties: &Value, key: &str) -> Value {
    let mut updated = properties.clone();
    if let Some(map) = updated.as_object_mut() {
        map.remove(key);
    }
    updated
}
