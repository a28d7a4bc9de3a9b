//! Service layer — the CRUD facade and its named-operation registry.
//!
//! `CrudService` holds a record schema and a store handle and exposes the
//! CRUD operations as plain methods. `Registry` exposes the same operations
//! under stable names with declared input shapes, so an external dispatcher
//! can route JSON requests to them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use crudbus::{CrudService, FieldType, InMemoryStore, Registry, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .required("name", FieldType::String)
//!     .field("age", FieldType::Number);
//! let service = CrudService::with_schema(schema, Box::new(InMemoryStore::new()));
//! let registry = Registry::new(service);
//!
//! let created = registry.dispatch("createOne", json!({ "name": "Al", "age": "30" }))?;
//! assert_eq!(created["age"], json!(30));
//! ```

mod crud;
mod registry;

pub use crud::CrudService;
pub use registry::Registry;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
