//! Glossary term handler lifecycle tests.

#[macro_use]
mod common;

use common::fixtures::{DOMAIN, glossary_term_properties, with, without};
use common::{CatalogCall, RecordingCatalog};
use datazone_resources::catalog::{CatalogOperation, EntityStatus};
use datazone_resources::{
    CustomResourceHandler, GlossaryTermHandler, LifecycleEvent, LifecycleResult,
};
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_omits_empty_descriptions() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new().returning_id("t-1"));
    let properties = with(
        &with(&glossary_term_properties("g-123"), "ShortDescription", json!("")),
        "LongDescription",
        Value::Null,
    );

    let result = handler
        .handle(&LifecycleEvent::create(properties))
        .await
        .unwrap();

    assert_eq!(
        result,
        LifecycleResult::with_physical_resource_id("t-1").data("GlossaryTermId", "t-1")
    );

    let calls = handler.catalog().calls();
    let CatalogCall::CreateGlossaryTerm(input) = &calls[0] else {
        panic!("expected term create, got {:?}", calls[0]);
    };
    let mut payload = serde_json::to_value(input).unwrap();
    let token = payload.as_object_mut().unwrap().remove("clientToken");
    assert!(token.is_some_and(|t| t.as_str().is_some_and(|t| !t.is_empty())));
    assert_eq!(
        payload,
        json!({
            "domainIdentifier": DOMAIN,
            "glossaryIdentifier": "g-123",
            "name": "Revenue",
            "status": "ENABLED"
        })
    );
}

#[tokio::test]
async fn test_create_sends_supplied_descriptions() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());
    let properties = with(
        &glossary_term_properties("g-123"),
        "ShortDescription",
        json!("Income from sales"),
    );

    handler
        .handle(&LifecycleEvent::create(properties))
        .await
        .unwrap();

    let calls = handler.catalog().calls();
    let CatalogCall::CreateGlossaryTerm(input) = &calls[0] else {
        panic!("expected term create");
    };
    assert_eq!(
        input.fields.short_description.as_deref(),
        Some("Income from sales")
    );
    assert_eq!(input.fields.long_description, None);
}

#[tokio::test]
async fn test_update_reports_glossary_id_attribute() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());

    let result = handler
        .handle(&LifecycleEvent::update(
            "t-1",
            with(&glossary_term_properties("g-123"), "Status", json!("DISABLED")),
        ))
        .await
        .unwrap();

    assert_eq!(result.physical_resource_id.as_deref(), Some("t-1"));
    assert_eq!(result.attribute("GlossaryId"), Some("t-1"));
    assert_eq!(result.attribute("GlossaryTermId"), None);

    let calls = handler.catalog().calls();
    let CatalogCall::UpdateGlossaryTerm(input) = &calls[0] else {
        panic!("expected term update");
    };
    assert_eq!(input.identifier, "t-1");
    assert_eq!(input.glossary_identifier, "g-123");
    assert_eq!(input.fields.status, Some(EntityStatus::Disabled));
}

#[tokio::test]
async fn test_term_relations_are_ignored() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());
    let properties = with(
        &glossary_term_properties("g-123"),
        "TermRelations",
        json!({"isA": ["t-9"]}),
    );

    handler
        .handle(&LifecycleEvent::create(properties.clone()))
        .await
        .unwrap();
    let plain = GlossaryTermHandler::new(RecordingCatalog::new());
    plain
        .handle(&LifecycleEvent::create(glossary_term_properties("g-123")))
        .await
        .unwrap();

    let (with_relations, without_relations) = (handler.catalog().calls(), plain.catalog().calls());
    let (CatalogCall::CreateGlossaryTerm(a), CatalogCall::CreateGlossaryTerm(b)) =
        (&with_relations[0], &without_relations[0])
    else {
        panic!("expected term creates");
    };
    assert_eq!(a.fields, b.fields);
}

#[tokio::test]
async fn test_missing_required_property_makes_no_calls() {
    for key in ["DomainIdentifier", "GlossaryIdentifier", "Name"] {
        let handler = GlossaryTermHandler::new(RecordingCatalog::new());
        let result = handler
            .handle(&LifecycleEvent::create(without(
                &glossary_term_properties("g-123"),
                key,
            )))
            .await;

        assert_validation_error!(result);
        assert!(handler.catalog().calls().is_empty(), "{} triggered a call", key);
    }
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());
    let result = handler
        .handle(&LifecycleEvent::create(with(
            &glossary_term_properties("g-123"),
            "Status",
            json!("enabled"),
        )))
        .await;

    assert_validation_error!(result);
    assert!(handler.catalog().calls().is_empty());
}

#[tokio::test]
async fn test_delete_disables_then_deletes() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());

    let result = handler
        .handle(&LifecycleEvent::delete("t-1", glossary_term_properties("g-123")))
        .await
        .unwrap();

    assert_eq!(result, LifecycleResult::success());
    let calls = handler.catalog().calls();
    let CatalogCall::UpdateGlossaryTerm(disable) = &calls[0] else {
        panic!("expected disabling update first");
    };
    assert_eq!(disable.fields.status, Some(EntityStatus::Disabled));
    assert_eq!(
        calls[1],
        CatalogCall::DeleteGlossaryTerm {
            domain: DOMAIN.to_string(),
            identifier: "t-1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_delete_failure_is_suppressed() {
    let handler = GlossaryTermHandler::new(
        RecordingCatalog::new().failing_on(CatalogOperation::DeleteGlossaryTerm),
    );

    let result = handler
        .handle(&LifecycleEvent::delete("t-1", glossary_term_properties("g-123")))
        .await
        .unwrap();

    assert_eq!(result, LifecycleResult::success());
}

#[tokio::test]
async fn test_disable_failure_propagates() {
    let handler = GlossaryTermHandler::new(
        RecordingCatalog::new().failing_on(CatalogOperation::UpdateGlossaryTerm),
    );

    let result = handler
        .handle(&LifecycleEvent::delete("t-1", glossary_term_properties("g-123")))
        .await;

    assert_remote_error!(result, CatalogOperation::UpdateGlossaryTerm);
    assert_eq!(
        handler.catalog().operations(),
        vec![CatalogOperation::UpdateGlossaryTerm]
    );
}

#[tokio::test]
async fn test_delete_ignores_unparseable_status() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());
    let properties = with(&glossary_term_properties("g-123"), "Status", json!("archived"));

    let result = handler
        .handle(&LifecycleEvent::delete("t-1", properties))
        .await
        .unwrap();

    assert_eq!(result, LifecycleResult::success());
    assert_eq!(
        handler.catalog().operations(),
        vec![
            CatalogOperation::UpdateGlossaryTerm,
            CatalogOperation::DeleteGlossaryTerm
        ]
    );
    let calls = handler.catalog().calls();
    let CatalogCall::UpdateGlossaryTerm(disable) = &calls[0] else {
        panic!("expected disabling update first");
    };
    assert_eq!(disable.fields.status, Some(EntityStatus::Disabled));
}

#[tokio::test]
async fn test_repeated_update_sends_same_request() {
    let handler = GlossaryTermHandler::new(RecordingCatalog::new());
    let properties = with(
        &glossary_term_properties("g-123"),
        "LongDescription",
        json!("Income before costs"),
    );
    let event = LifecycleEvent::update("t-1", properties);

    let first = handler.handle(&event).await.unwrap();
    let second = handler.handle(&event).await.unwrap();

    assert_eq!(first, second);
    let calls = handler.catalog().calls();
    assert_eq!(calls.len(), 2);
    let (CatalogCall::UpdateGlossaryTerm(a), CatalogCall::UpdateGlossaryTerm(b)) =
        (&calls[0], &calls[1])
    else {
        panic!("expected two term updates, got {:?}", calls);
    };
    assert_eq!(a, b);
    assert_eq!(a.identifier, "t-1");
}
