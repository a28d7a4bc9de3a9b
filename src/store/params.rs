//! Parameter structs for store operations.
//!
//! These double as the declared input shapes for named dispatch: the
//! registry deserializes JSON payloads into them, so a payload that does not
//! fit the shape is rejected before the store is ever touched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{ query, options }` — both optional. Used by `findOne`, `deleteOne`,
/// `deleteMany`, and `count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl QueryParams {
    /// Params matching the given query, no options.
    pub fn matching(query: Map<String, Value>) -> Self {
        Self {
            query: Some(query),
            options: None,
        }
    }
}

/// `{ query, orderBy, limit, skip, fields }` — all optional. Used by
/// `findMany`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindManyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

/// `{ update, ... }` — `update` is required; every other key passes through
/// to the store verbatim and unvalidated (updates may target arbitrary
/// store-level fields). Used by `updateOne` and `updateMany`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParams {
    pub update: Map<String, Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl UpdateParams {
    /// Params carrying only the update document.
    pub fn new(update: Map<String, Value>) -> Self {
        Self {
            update,
            rest: Map::new(),
        }
    }

    /// Attach a pass-through key (e.g. `query`, `options`).
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.rest.insert(key.into(), value);
        self
    }

    /// The pass-through `query` key, if present and an object.
    pub fn query(&self) -> Option<&Map<String, Value>> {
        self.rest.get("query").and_then(Value::as_object)
    }
}
