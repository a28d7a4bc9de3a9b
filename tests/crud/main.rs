//! Facade and dispatch integration tests against a recording stub store.

mod support;

use serde_json::{json, Value};

use crudbus::{
    CrudService, FieldType, QueryParams, Registry, Schema, ServiceError, UpdateParams,
};
use support::{FailingSaveStore, RecordingStore};

fn person_schema() -> Schema {
    Schema::new()
        .required("name", FieldType::String)
        .field("age", FieldType::Number)
}

fn service_with_schema(store: RecordingStore) -> CrudService {
    CrudService::with_schema(person_schema(), Box::new(store))
}

#[test]
fn create_one_coerces_and_strips_before_save() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let result = service
        .create_one(json!({ "name": "Al", "age": "30", "extra": true }))
        .unwrap();

    // The store saw the conformed record, and the facade returned the
    // store's result unchanged (the stub echoes).
    let expected = json!({ "name": "Al", "age": 30 });
    assert_eq!(store.calls(), vec![("save".to_string(), expected.clone())]);
    assert_eq!(result, expected);
}

#[test]
fn create_one_validation_failure_never_touches_store() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let result = service.create_one(json!({ "name": "Al", "age": "not a number" }));
    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert!(store.calls().is_empty());
}

#[test]
fn create_many_preserves_input_order() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let results = service
        .create_many(vec![
            json!({ "name": "a", "age": "1" }),
            json!({ "name": "b", "age": "2" }),
            json!({ "name": "c", "age": "3" }),
        ])
        .unwrap();

    assert_eq!(
        results,
        vec![
            json!({ "name": "a", "age": 1 }),
            json!({ "name": "b", "age": 2 }),
            json!({ "name": "c", "age": 3 }),
        ]
    );
    assert_eq!(store.call_names(), vec!["save", "save", "save"]);
}

#[test]
fn create_many_rejects_empty_without_store_contact() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let result = service.create_many(vec![]);
    assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    assert!(store.calls().is_empty());
}

#[test]
fn create_many_fails_whole_call_on_one_bad_record() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let result = service.create_many(vec![
        json!({ "name": "ok" }),
        json!({ "age": 1 }), // missing required name
        json!({ "name": "never reached" }),
    ]);
    assert!(matches!(result, Err(ServiceError::Validation(_))));
    // The bad record aborts the aggregate before later records are saved.
    assert_eq!(store.call_names(), vec!["save"]);
}

#[test]
fn replace_one_shares_the_save_path() {
    let store = RecordingStore::new();
    let service = service_with_schema(store.clone());

    let result = service
        .replace_one(json!({ "name": "Al", "stale": "field" }))
        .unwrap();
    assert_eq!(result, json!({ "name": "Al" }));

    assert!(matches!(
        service.replace_one(json!(42)),
        Err(ServiceError::InvalidInput(_))
    ));
}

#[test]
fn no_schema_passes_writes_through_unchanged() {
    let store = RecordingStore::new();
    let service = CrudService::new(Box::new(store.clone()));

    let record = json!({ "anything": [1, 2], "goes": true });
    let result = service.create_one(record.clone()).unwrap();
    assert_eq!(result, record);
    assert_eq!(store.calls(), vec![("save".to_string(), record)]);
}

#[test]
fn store_save_failure_propagates_unchanged() {
    let store = FailingSaveStore::default();
    let service = CrudService::with_schema(person_schema(), Box::new(store));

    let result = service.create_one(json!({ "name": "Al" }));
    match result {
        Err(ServiceError::Store(e)) => assert_eq!(e.to_string(), "backend error: save refused"),
        other => panic!("expected store error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn query_returns_store_result() {
    let store = RecordingStore::new();
    let service = CrudService::new(Box::new(store.clone()));

    let result = service
        .query(|store| store.count(QueryParams::default()))
        .unwrap();
    assert_eq!(result, json!(7));
    assert_eq!(store.call_names(), vec!["count"]);
}

#[test]
fn find_by_id_rejects_null_before_store_contact() {
    let store = RecordingStore::new();
    let service = CrudService::new(Box::new(store.clone()));

    assert!(matches!(
        service.find_by_id(&Value::Null),
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(store.calls().is_empty());

    let found = service.find_by_id(&json!("abc")).unwrap();
    assert_eq!(found, json!({ "id": "abc" }));
}

#[test]
fn update_params_pass_through_verbatim() {
    let store = RecordingStore::new();
    let service = CrudService::with_schema(person_schema(), Box::new(store.clone()));

    // Unknown keys and the update document reach the store unvalidated,
    // even though the write path would have stripped them.
    let params = UpdateParams::new(
        json!({ "age": 99, "undeclared": true })
            .as_object()
            .cloned()
            .unwrap(),
    )
    .with("query", json!({ "name": "Al" }))
    .with("anything", json!("else"));

    service.update_one(params.clone()).unwrap();
    service.update_many(params.clone()).unwrap();

    let expected = serde_json::to_value(&params).unwrap();
    assert_eq!(
        store.calls(),
        vec![
            ("updateOne".to_string(), expected.clone()),
            ("updateMany".to_string(), expected),
        ]
    );
}

#[test]
fn set_store_affects_subsequent_operations_only() {
    let first = RecordingStore::new();
    let second = RecordingStore::new();
    let mut service = CrudService::new(Box::new(first.clone()));

    service.count(QueryParams::default()).unwrap();
    service.set_store(Box::new(second.clone()));
    service.find_one(QueryParams::default()).unwrap();

    assert_eq!(first.call_names(), vec!["count"]);
    assert_eq!(second.call_names(), vec!["findOne"]);
}

#[test]
fn dispatch_rejections_never_reach_the_store() {
    let store = RecordingStore::new();
    let registry = Registry::new(service_with_schema(store.clone()));

    assert!(registry.dispatch("findById", Value::Null).is_err());
    assert!(registry.dispatch("createMany", json!([])).is_err());
    assert!(registry.dispatch("updateOne", json!({ "query": {} })).is_err());
    assert!(registry
        .dispatch("updateMany", json!({ "update": "not an object" }))
        .is_err());
    assert!(registry
        .dispatch("findMany", json!({ "limit": "not a number" }))
        .is_err());

    assert!(store.calls().is_empty());
}

#[test]
fn dispatch_null_equals_empty_object_for_optional_shapes() {
    for operation in ["findOne", "findMany", "deleteOne", "deleteMany", "count"] {
        let store = RecordingStore::new();
        let registry = Registry::new(CrudService::new(Box::new(store.clone())));

        let with_null = registry.dispatch(operation, Value::Null).unwrap();
        let with_empty = registry.dispatch(operation, json!({})).unwrap();
        assert_eq!(with_null, with_empty, "operation {}", operation);

        let calls = store.calls();
        assert_eq!(calls.len(), 2, "operation {}", operation);
        assert_eq!(calls[0], calls[1], "operation {}", operation);
    }
}

#[test]
fn dispatch_end_to_end_with_schema() {
    let store = RecordingStore::new();
    let registry = Registry::new(service_with_schema(store.clone()));

    let result = registry
        .dispatch("createOne", json!({ "name": "Al", "age": "30", "extra": true }))
        .unwrap();
    assert_eq!(result, json!({ "name": "Al", "age": 30 }));

    let results = registry
        .dispatch("createMany", json!([{ "name": "b" }, { "name": "c" }]))
        .unwrap();
    assert_eq!(results, json!([{ "name": "b" }, { "name": "c" }]));
}

#[test]
fn swapping_the_store_through_the_registry() {
    let first = RecordingStore::new();
    let second = RecordingStore::new();
    let mut registry = Registry::new(CrudService::new(Box::new(first.clone())));

    registry.dispatch("count", Value::Null).unwrap();
    registry.service_mut().set_store(Box::new(second.clone()));
    registry.dispatch("count", Value::Null).unwrap();

    assert_eq!(first.call_names(), vec!["count"]);
    assert_eq!(second.call_names(), vec!["count"]);
}
