//! Store trait — abstract CRUD storage over opaque JSON records.

use serde_json::Value;

use super::error::StoreError;
use super::params::{FindManyParams, QueryParams, UpdateParams};

/// The capability set a backend must expose.
///
/// Return shapes are store-defined and opaque to the facade: every method
/// yields a `serde_json::Value` the facade passes back to the caller
/// unchanged. Object-safe, so the facade can hold a `Box<dyn Store>` and
/// swap it at runtime.
pub trait Store: Send + Sync {
    /// Look up a single record by id.
    fn find_by_id(&self, id: &Value) -> Result<Value, StoreError>;

    /// Find the first record matching the query.
    fn find_one(&self, params: QueryParams) -> Result<Value, StoreError>;

    /// Find all records matching the query, honoring ordering and paging.
    fn find_many(&self, params: FindManyParams) -> Result<Value, StoreError>;

    /// Persist a record (insert or replace; store-defined).
    fn save(&self, record: Value) -> Result<Value, StoreError>;

    /// Apply an update to the first matching record.
    fn update_one(&self, params: UpdateParams) -> Result<Value, StoreError>;

    /// Apply an update to every matching record.
    fn update_many(&self, params: UpdateParams) -> Result<Value, StoreError>;

    /// Delete the first matching record.
    fn delete_one(&self, params: QueryParams) -> Result<Value, StoreError>;

    /// Delete every matching record.
    fn delete_many(&self, params: QueryParams) -> Result<Value, StoreError>;

    /// Count records matching the query.
    fn count(&self, params: QueryParams) -> Result<Value, StoreError>;
}
