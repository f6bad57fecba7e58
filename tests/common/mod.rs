//! Common test utilities for handler testing.
//!
//! - `fixtures` - resource property builders for the three entity types
//! - `recording` - a catalog client that records calls and injects failures

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod recording;

pub use recording::{CatalogCall, RecordingCatalog};

/// Assert that a handler result failed validation.
#[macro_export]
macro_rules! assert_validation_error {
    ($result:expr) => {
        match $result {
            Err(datazone_resources::HandlerError::Validation(_)) => {}
            Ok(ok) => panic!("Expected validation error, but handler returned {:?}", ok),
            Err(other) => panic!("Expected validation error, got {:?}", other),
        }
    };
}

/// Assert that a handler result failed in the given catalog operation.
#[macro_export]
macro_rules! assert_remote_error {
    ($result:expr, $operation:expr) => {
        match $result {
            Err(datazone_resources::HandlerError::Remote(e)) => {
                assert_eq!(e.operation(), $operation, "unexpected failing operation");
            }
            Ok(ok) => panic!("Expected remote error, but handler returned {:?}", ok),
            Err(other) => panic!("Expected remote error, got {:?}", other),
        }
    };
}
