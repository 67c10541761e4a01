//! End-to-end person lifecycle tests against the in-memory collaborators.

use domain_persons::{NO_DOCUMENT_NUMBER, Person, PersonService};
use lifecycle::{ErrorCode, Field, MemoryBroker, MemoryRepository, Record, StaticOracle};
use serde_json::{Value, json};

const ACTOR: &str = "1de1ca4e-7bd1-4a30-97e4-18ab0b49e7d0";

fn service() -> (
    PersonService<MemoryRepository, MemoryBroker, StaticOracle>,
    MemoryRepository,
    MemoryBroker,
) {
    let repository = MemoryRepository::new("personId");
    let broker = MemoryBroker::new();
    let oracle = StaticOracle::allowing([ACTOR]);
    (
        PersonService::new(repository.clone(), broker.clone(), oracle),
        repository,
        broker,
    )
}

fn object(value: Value) -> Record {
    value.as_object().cloned().expect("object payload")
}

#[tokio::test]
async fn create_defaults_the_document_number_sentinel() {
    let (service, repository, broker) = service();

    let person = service
        .create_person(
            Some(ACTOR),
            object(json!({ "name": "Ada", "lastName": "Lovelace" })),
        )
        .await
        .unwrap();

    assert_eq!(
        person.document_number,
        Field::Set(NO_DOCUMENT_NUMBER.to_string())
    );
    assert_eq!(person.audit.create_uid, Field::Set(ACTOR.to_string()));

    let stored = repository.stored(&person.person_id).unwrap();
    assert_eq!(stored.get("documentNumber"), Some(&json!(NO_DOCUMENT_NUMBER)));
    assert_eq!(broker.published()[0].0, "person.created");
}

#[tokio::test]
async fn supplied_document_number_wins_over_the_sentinel() {
    let (service, _repository, _broker) = service();

    let person = service
        .create_person(
            Some(ACTOR),
            object(json!({
                "name": "Ada",
                "lastName": "Lovelace",
                "documentNumber": "AB-1234",
            })),
        )
        .await
        .unwrap();

    assert_eq!(person.document_number, Field::Set("AB-1234".to_string()));
}

#[tokio::test]
async fn extra_primitive_keys_survive_in_the_attrs_map() {
    let (service, repository, _broker) = service();

    let person = service
        .create_person(
            Some(ACTOR),
            object(json!({
                "name": "Ada",
                "lastName": "Lovelace",
                "zip": "04002",
            })),
        )
        .await
        .unwrap();

    assert_eq!(person.attrs.get("zip"), Some(&json!("04002")));

    let stored = repository.stored(&person.person_id).unwrap();
    assert_eq!(stored.get("attrs"), Some(&json!({ "zip": "04002" })));

    let id = service.parse_identifier(&person.person_id).unwrap();
    let fetched: Person = service.get_person(&id).await.unwrap().unwrap();
    assert_eq!(fetched.attrs.get("zip"), Some(&json!("04002")));
}

#[tokio::test]
async fn nested_extra_values_are_rejected_before_storage() {
    let (service, repository, broker) = service();

    let err = service
        .create_person(
            Some(ACTOR),
            object(json!({
                "name": "Ada",
                "lastName": "Lovelace",
                "nested": { "a": 1 },
            })),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidFormat);
    assert!(repository.is_empty());
    assert!(broker.published().is_empty());
}

#[tokio::test]
async fn missing_required_name_parts_are_all_reported() {
    let (service, repository, _broker) = service();

    let err = service
        .create_person(Some(ACTOR), object(json!({ "birthDate": "1990-04-12" })))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidFormat);
    let message = err.message().to_string();
    assert!(message.contains("name"));
    assert!(message.contains("lastName"));
    assert!(repository.is_empty());
}

#[tokio::test]
async fn update_delta_validates_only_what_it_carries() {
    let (service, repository, _broker) = service();

    let created = service
        .create_person(
            Some(ACTOR),
            object(json!({ "name": "Ada", "lastName": "Lovelace" })),
        )
        .await
        .unwrap();

    // No name parts in the delta; only the supplied date is checked.
    service
        .update_person(
            Some(ACTOR),
            object(json!({
                "personId": created.person_id,
                "birthDate": "1815-12-10",
            })),
        )
        .await
        .unwrap();

    let patch = repository.last_patch().unwrap();
    let mut keys: Vec<&str> = patch.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["birthDate", "writeAt", "writeUId"]);

    let bad = service
        .update_person(
            Some(ACTOR),
            object(json!({
                "personId": created.person_id,
                "birthDate": "10/12/1815",
            })),
        )
        .await
        .unwrap_err();
    assert_eq!(bad.code(), ErrorCode::InvalidFormat);
}

#[tokio::test]
async fn delete_removes_and_announces() {
    let (service, repository, broker) = service();

    let created = service
        .create_person(
            Some(ACTOR),
            object(json!({ "name": "Ada", "lastName": "Lovelace" })),
        )
        .await
        .unwrap();
    let id = service.parse_identifier(&created.person_id).unwrap();

    service.delete_person(Some(ACTOR), &id).await.unwrap();

    assert!(repository.is_empty());
    assert_eq!(broker.published().last().unwrap().0, "person.deleted");
}
