//! Registry — named-operation dispatch with declared input shapes.
//!
//! Maps stable operation names (`findById`, `createOne`, ...) to handler
//! functions, built once at construction. `dispatch` applies the
//! operation's input shape (deserializing the JSON payload into its
//! parameter struct) before the facade — and therefore the store — is
//! touched. A `Null` payload to an optional-object operation is equivalent
//! to `{}`.
//!
//! `query` takes a closure, not data, so it is not dispatchable by name;
//! use `CrudService::query` directly.
//!
//! ## Example
//!
//! ```ignore
//! let registry = Registry::new(CrudService::new(Box::new(InMemoryStore::new())));
//!
//! let created = registry.dispatch("createOne", json!({ "name": "Al" }))?;
//! let found = registry.dispatch("findById", created["id"].clone())?;
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::crud::CrudService;
use crate::error::ServiceError;
use crate::store::{FindManyParams, QueryParams, UpdateParams};

type OperationHandler =
    Box<dyn Fn(&CrudService, Value) -> Result<Value, ServiceError> + Send + Sync>;

/// Routes named operations to facade methods.
pub struct Registry {
    service: CrudService,
    handlers: HashMap<String, OperationHandler>,
}

impl Registry {
    /// Wrap a facade, registering every CRUD operation under its stable name.
    pub fn new(service: CrudService) -> Self {
        let registry = Self {
            service,
            handlers: HashMap::new(),
        };

        registry
            .operation("findById", |service, input| {
                if input.is_null() {
                    return Err(ServiceError::InvalidInput(
                        "findById requires an id".to_string(),
                    ));
                }
                service.find_by_id(&input)
            })
            .operation("findOne", |service, input| {
                service.find_one(optional_shape(input)?)
            })
            .operation("findMany", |service, input| {
                service.find_many(optional_shape::<FindManyParams>(input)?)
            })
            .operation("createOne", |service, input| service.create_one(input))
            .operation("createMany", |service, input| {
                let records: Vec<Value> = required_shape("createMany", input)?;
                Ok(Value::Array(service.create_many(records)?))
            })
            .operation("updateOne", |service, input| {
                service.update_one(required_shape::<UpdateParams>("updateOne", input)?)
            })
            .operation("updateMany", |service, input| {
                service.update_many(required_shape::<UpdateParams>("updateMany", input)?)
            })
            .operation("replaceOne", |service, input| service.replace_one(input))
            .operation("deleteOne", |service, input| {
                service.delete_one(optional_shape(input)?)
            })
            .operation("deleteMany", |service, input| {
                service.delete_many(optional_shape(input)?)
            })
            .operation("count", |service, input| {
                service.count(optional_shape(input)?)
            })
    }

    /// Register an operation handler.
    ///
    /// Uses builder pattern — returns `self` for chaining.
    pub fn operation<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&CrudService, Value) -> Result<Value, ServiceError> + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
        self
    }

    /// Dispatch an operation by name.
    ///
    /// Looks up the handler, applies the declared input shape, then calls
    /// the facade method. Shape violations reject before any store call.
    pub fn dispatch(&self, operation: &str, input: Value) -> Result<Value, ServiceError> {
        let handler = self
            .handlers
            .get(operation)
            .ok_or_else(|| ServiceError::UnknownOperation(operation.to_string()))?;
        handler(&self.service, input)
    }

    /// List registered operation names.
    pub fn operations(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the wrapped facade.
    pub fn service(&self) -> &CrudService {
        &self.service
    }

    /// Get a mutable reference to the wrapped facade (e.g. for `set_store`).
    pub fn service_mut(&mut self) -> &mut CrudService {
        &mut self.service
    }
}

/// Shape check for operations whose input object is optional: `Null`
/// becomes the default (empty) shape.
fn optional_shape<T: DeserializeOwned + Default>(input: Value) -> Result<T, ServiceError> {
    if input.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(input).map_err(|e| ServiceError::InvalidInput(e.to_string()))
}

/// Shape check for operations with a required input payload.
fn required_shape<T: DeserializeOwned>(operation: &str, input: Value) -> Result<T, ServiceError> {
    if input.is_null() {
        return Err(ServiceError::InvalidInput(format!(
            "{} requires an input payload",
            operation
        )));
    }
    serde_json::from_value(input).map_err(|e| ServiceError::InvalidInput(e.to_string()))
}
