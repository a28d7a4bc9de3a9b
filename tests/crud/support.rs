//! Test support: a stub store that records every call it receives.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crudbus::{FindManyParams, QueryParams, Store, StoreError, UpdateParams};

/// Stub store recording `(method, payload)` pairs. Clone-friendly so tests
/// can keep a handle after boxing it into the facade.
#[derive(Clone, Default)]
pub struct RecordingStore {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    fn record(&self, method: &str, payload: Value) {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), payload));
    }
}

impl Store for RecordingStore {
    fn find_by_id(&self, id: &Value) -> Result<Value, StoreError> {
        self.record("findById", id.clone());
        Ok(json!({ "id": id }))
    }

    fn find_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.record("findOne", serde_json::to_value(&params).unwrap());
        Ok(json!({ "one": true }))
    }

    fn find_many(&self, params: FindManyParams) -> Result<Value, StoreError> {
        self.record("findMany", serde_json::to_value(&params).unwrap());
        Ok(json!([]))
    }

    fn save(&self, record: Value) -> Result<Value, StoreError> {
        self.record("save", record.clone());
        // Echoes the record so tests can assert the facade returns the
        // store's result unchanged.
        Ok(record)
    }

    fn update_one(&self, params: UpdateParams) -> Result<Value, StoreError> {
        self.record("updateOne", serde_json::to_value(&params).unwrap());
        Ok(json!({ "updated": 1 }))
    }

    fn update_many(&self, params: UpdateParams) -> Result<Value, StoreError> {
        self.record("updateMany", serde_json::to_value(&params).unwrap());
        Ok(json!({ "updated": "many" }))
    }

    fn delete_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.record("deleteOne", serde_json::to_value(&params).unwrap());
        Ok(json!({ "deleted": 1 }))
    }

    fn delete_many(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.record("deleteMany", serde_json::to_value(&params).unwrap());
        Ok(json!({ "deleted": "many" }))
    }

    fn count(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.record("count", serde_json::to_value(&params).unwrap());
        Ok(json!(7))
    }
}

/// Stub store whose `save` always fails. Everything else delegates to a
/// `RecordingStore` so call tracking still works.
#[derive(Clone, Default)]
pub struct FailingSaveStore {
    pub inner: RecordingStore,
}

impl Store for FailingSaveStore {
    fn find_by_id(&self, id: &Value) -> Result<Value, StoreError> {
        self.inner.find_by_id(id)
    }

    fn find_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.inner.find_one(params)
    }

    fn find_many(&self, params: FindManyParams) -> Result<Value, StoreError> {
        self.inner.find_many(params)
    }

    fn save(&self, _record: Value) -> Result<Value, StoreError> {
        Err(StoreError::Backend("save refused".to_string()))
    }

    fn update_one(&self, params: UpdateParams) -> Result<Value, StoreError> {
        self.inner.update_one(params)
    }

    fn update_many(&self, params: UpdateParams) -> Result<Value, StoreError> {
        self.inner.update_many(params)
    }

    fn delete_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.inner.delete_one(params)
    }

    fn delete_many(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.inner.delete_many(params)
    }

    fn count(&self, params: QueryParams) -> Result<Value, StoreError> {
        self.inner.count(params)
    }
}
