//! CrudService — the facade over a schema and a store handle.
//!
//! Every operation is a single step: validate/normalize the input, delegate
//! to the store, return its result. Store errors propagate unchanged; no
//! retry, no added context. The write path (`create_one`, `create_many`,
//! `replace_one`) shares one `save` helper that applies the schema's
//! convert + strip-unknown policies before the store sees the record.

use serde_json::Value;

use crate::error::ServiceError;
use crate::schema::Schema;
use crate::store::{FindManyParams, QueryParams, Store, StoreError, UpdateParams};

/// Named CRUD operations over an injected store.
///
/// Holds an optional `Schema` for the write path and an exclusively owned,
/// replaceable store handle. Stateless across operations; instances share
/// nothing.
pub struct CrudService {
    schema: Option<Schema>,
    store: Box<dyn Store>,
}

impl CrudService {
    /// Create a facade with no record schema: write payloads pass through
    /// to the store unchanged.
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            schema: None,
            store,
        }
    }

    /// Create a facade that conforms write payloads to `schema`.
    pub fn with_schema(schema: Schema, store: Box<dyn Store>) -> Self {
        Self {
            schema: Some(schema),
            store,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Replace the backing store. Takes effect for subsequent operations
    /// only; no validation is performed on the replacement.
    pub fn set_store(&mut self, store: Box<dyn Store>) {
        self.store = store;
    }

    /// The configured record schema, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Run an arbitrary function against the store and return its result.
    pub fn query<T>(
        &self,
        f: impl FnOnce(&dyn Store) -> Result<T, StoreError>,
    ) -> Result<T, ServiceError> {
        f(self.store.as_ref()).map_err(ServiceError::Store)
    }

    /// Look up a record by id. Rejects a null id before touching the store.
    pub fn find_by_id(&self, id: &Value) -> Result<Value, ServiceError> {
        if id.is_null() {
            return Err(ServiceError::InvalidInput(
                "findById requires an id".to_string(),
            ));
        }
        Ok(self.store.find_by_id(id)?)
    }

    pub fn find_one(&self, params: QueryParams) -> Result<Value, ServiceError> {
        Ok(self.store.find_one(params)?)
    }

    pub fn find_many(&self, params: FindManyParams) -> Result<Value, ServiceError> {
        Ok(self.store.find_many(params)?)
    }

    /// Validate a record against the schema and save it.
    pub fn create_one(&self, data: Value) -> Result<Value, ServiceError> {
        self.save(data)
    }

    /// Validate and save each record independently, aggregating results in
    /// input order. Fails fast: the first validation or store error rejects
    /// the whole call. Rejects an empty input before touching the store.
    pub fn create_many(&self, data: Vec<Value>) -> Result<Vec<Value>, ServiceError> {
        if data.is_empty() {
            return Err(ServiceError::InvalidInput(
                "createMany requires at least one record".to_string(),
            ));
        }
        data.into_iter().map(|record| self.save(record)).collect()
    }

    pub fn update_one(&self, params: UpdateParams) -> Result<Value, ServiceError> {
        Ok(self.store.update_one(params)?)
    }

    pub fn update_many(&self, params: UpdateParams) -> Result<Value, ServiceError> {
        Ok(self.store.update_many(params)?)
    }

    /// Validate a full replacement record against the schema and save it.
    pub fn replace_one(&self, data: Value) -> Result<Value, ServiceError> {
        if !data.is_object() {
            return Err(ServiceError::InvalidInput(
                "replaceOne requires an object".to_string(),
            ));
        }
        self.save(data)
    }

    pub fn delete_one(&self, params: QueryParams) -> Result<Value, ServiceError> {
        Ok(self.store.delete_one(params)?)
    }

    pub fn delete_many(&self, params: QueryParams) -> Result<Value, ServiceError> {
        Ok(self.store.delete_many(params)?)
    }

    pub fn count(&self, params: QueryParams) -> Result<Value, ServiceError> {
        Ok(self.store.count(params)?)
    }

    /// Shared write path: conform the record to the schema (when one is
    /// configured), then delegate to `store.save`.
    fn save(&self, data: Value) -> Result<Value, ServiceError> {
        let validated = match &self.schema {
            Some(schema) => schema.validate(&data)?,
            None => data,
        };
        Ok(self.store.save(validated)?)
    }
}
