mod error;
mod schema;
mod service;
mod store;

pub use error::ServiceError;
pub use schema::{FieldSpec, FieldType, Schema, ValidationError};
pub use service::{CrudService, Registry};
pub use store::{FindManyParams, InMemoryStore, QueryParams, Store, StoreError, UpdateParams};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub use service::{router, serve};
