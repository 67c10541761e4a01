//! End-to-end document lifecycle tests against the in-memory collaborators.

use domain_documents::{Document, DocumentService};
use lifecycle::{ErrorCode, Field, MemoryBroker, MemoryRepository, Record, StaticOracle};
use serde_json::{Value, json};

const ACTOR: &str = "editor-1";

fn service() -> (
    DocumentService<MemoryRepository, MemoryBroker, StaticOracle>,
    MemoryRepository,
    MemoryBroker,
) {
    let repository = MemoryRepository::new("documentId");
    let broker = MemoryBroker::new();
    let oracle = StaticOracle::allowing([ACTOR]);
    (
        DocumentService::new(repository.clone(), broker.clone(), oracle),
        repository,
        broker,
    )
}

fn object(value: Value) -> Record {
    value.as_object().cloned().expect("object payload")
}

#[tokio::test]
async fn create_assigns_a_nano_id_when_the_payload_has_none() {
    let (service, repository, broker) = service();

    let document = service
        .create_document(Some(ACTOR), object(json!({ "body": "contract text" })))
        .await
        .unwrap();

    assert_eq!(document.document_id.chars().count(), 21);
    assert!(repository.stored(&document.document_id).is_some());
    assert_eq!(broker.published()[0].0, "document.created");
}

#[tokio::test]
async fn primitive_extras_are_kept_and_composites_rejected() {
    let (service, repository, _broker) = service();

    let document = service
        .create_document(
            Some(ACTOR),
            object(json!({ "body": "contract text", "zip": "04002" })),
        )
        .await
        .unwrap();
    assert_eq!(document.attrs.get("zip"), Some(&json!("04002")));

    let err = service
        .create_document(
            Some(ACTOR),
            object(json!({ "body": "other", "nested": { "a": 1 } })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn blank_body_never_reaches_storage() {
    let (service, repository, broker) = service();

    let err = service
        .create_document(Some(ACTOR), object(json!({ "body": "   " })))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidFormat);
    assert!(repository.is_empty());
    assert!(broker.published().is_empty());
}

#[tokio::test]
async fn update_replaces_the_body_and_keeps_attrs() {
    let (service, repository, _broker) = service();

    let created = service
        .create_document(
            Some(ACTOR),
            object(json!({ "body": "v1", "revision": "a" })),
        )
        .await
        .unwrap();

    let updated = service
        .update_document(
            Some(ACTOR),
            object(json!({ "documentId": created.document_id, "body": "v2" })),
        )
        .await
        .unwrap();
    assert_eq!(updated.body, Field::Set("v2".to_string()));

    let stored = repository.stored(&created.document_id).unwrap();
    assert_eq!(stored.get("body"), Some(&json!("v2")));
    assert_eq!(stored.get("attrs"), Some(&json!({ "revision": "a" })));
}

#[tokio::test]
async fn delete_round_trip() {
    let (service, repository, broker) = service();

    let created = service
        .create_document(Some(ACTOR), object(json!({ "body": "contract text" })))
        .await
        .unwrap();
    let id = service.parse_identifier(&created.document_id).unwrap();

    service.delete_document(Some(ACTOR), &id).await.unwrap();
    assert!(repository.is_empty());
    assert_eq!(broker.published().last().unwrap().0, "document.deleted");

    let fetched: Option<Document> = service.get_document(&id).await.unwrap();
    assert!(fetched.is_none());
}
