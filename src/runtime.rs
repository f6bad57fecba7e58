//! Lambda runtime glue.
//!
//! [`run_handler`] serves lifecycle events with one handler until the runtime
//! shuts down. [`invoke`] is the per-event wrapper: it logs the envelope,
//! runs the handler and logs the outcome, and is used directly by the local
//! replay tool.

use crate::config::HandlerConfig;
use crate::error::HandlerResult;
use crate::event::{LifecycleEvent, LifecycleResult};
use crate::handlers::CustomResourceHandler;
use lambda_runtime::{LambdaEvent, service_fn};
use log::{error, info};

/// Process one event with `handler`.
pub async fn invoke<H: CustomResourceHandler>(
    handler: &H,
    event: &LifecycleEvent,
    config: &HandlerConfig,
) -> HandlerResult<LifecycleResult> {
    if config.log_events {
        info!("Received event: {}", serde_json::to_string(event)?);
    }

    let result = handler.handle(event).await;
    match &result {
        Ok(outcome) => info!(
            "{} {} completed: {}",
            H::RESOURCE,
            event.context(),
            serde_json::to_string(outcome)?
        ),
        Err(e) => error!("{} {} failed: {}", H::RESOURCE, event.context(), e),
    }
    result
}

/// Serve lifecycle events from the Lambda runtime API.
///
/// The handler and its catalog client are created once and shared by every
/// invocation the process receives.
pub async fn run_handler<H: CustomResourceHandler>(
    handler: H,
    config: HandlerConfig,
) -> Result<(), lambda_runtime::Error> {
    info!("Starting {} custom resource handler", H::RESOURCE);
    let handler = &handler;
    let config = &config;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<LifecycleEvent>| async move {
            invoke(handler, &event.payload, config)
                .await
                .map_err(lambda_runtime::Error::from)
        },
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::handlers::GlossaryHandler;
    use serde_json::json;

    #[tokio::test]
    async fn test_invoke_returns_handler_result() {
        let handler = GlossaryHandler::new(InMemoryCatalog::new());
        let event = LifecycleEvent::create(json!({
            "DomainIdentifier": "d1",
            "OwningProjectIdentifier": "p1",
            "GlossaryName": "Finance"
        }));

        let result = invoke(&handler, &event, &HandlerConfig::default())
            .await
            .unwrap();
        let id = result.physical_resource_id.clone().unwrap();
        assert_eq!(result.attribute("GlossaryId"), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_invoke_propagates_validation_failure() {
        let handler = GlossaryHandler::new(InMemoryCatalog::new());
        let event = LifecycleEvent::create(json!({"DomainIdentifier": "d1"}));

        assert!(
            invoke(&handler, &event, &HandlerConfig::default())
                .await
                .is_err()
        );
        assert_eq!(handler.catalog().stats().await.glossaries, 0);
    }
}
