//! InMemoryStore - Vec-backed store for testing and development.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

use super::error::StoreError;
use super::params::{FindManyParams, QueryParams, UpdateParams};
use super::store::Store;

struct Inner {
    records: Vec<Map<String, Value>>,
    next_id: u64,
}

/// In-memory store backed by a record list.
///
/// Queries are equality-subset matches: a record matches when every field of
/// the query equals the corresponding record field. Records without an `id`
/// get a sequential numeric one on save. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.records.len()).unwrap_or(0)
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matches(query: Option<&Map<String, Value>>, record: &Map<String, Value>) -> bool {
    match query {
        None => true,
        Some(query) => query
            .iter()
            .all(|(field, value)| record.get(field) == Some(value)),
    }
}

fn apply_update(record: &mut Map<String, Value>, update: &Map<String, Value>) {
    for (field, value) in update {
        record.insert(field.clone(), value.clone());
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Project a record down to the listed fields.
fn project(record: &Map<String, Value>, fields: &[Value]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        if let Some(name) = field.as_str() {
            if let Some(value) = record.get(name) {
                out.insert(name.to_string(), value.clone());
            }
        }
    }
    out
}

impl Store for InMemoryStore {
    fn find_by_id(&self, id: &Value) -> Result<Value, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_by_id"))?;

        let found = inner
            .records
            .iter()
            .find(|record| record.get("id") == Some(id));
        Ok(found.cloned().map(Value::Object).unwrap_or(Value::Null))
    }

    fn find_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_one"))?;

        let found = inner
            .records
            .iter()
            .find(|record| matches(params.query.as_ref(), record));
        Ok(found.cloned().map(Value::Object).unwrap_or(Value::Null))
    }

    fn find_many(&self, params: FindManyParams) -> Result<Value, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_many"))?;

        let mut found: Vec<Map<String, Value>> = inner
            .records
            .iter()
            .filter(|record| matches(params.query.as_ref(), record))
            .cloned()
            .collect();

        // orderBy: a field name, with a "-" prefix for descending
        if let Some(order_by) = params.order_by.as_ref().and_then(Value::as_str) {
            let (field, descending) = match order_by.strip_prefix('-') {
                Some(field) => (field, true),
                None => (order_by, false),
            };
            found.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(field).unwrap_or(&Value::Null),
                    b.get(field).unwrap_or(&Value::Null),
                );
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let skip = params.skip.unwrap_or(0) as usize;
        let mut found: Vec<Map<String, Value>> = found.into_iter().skip(skip).collect();
        if let Some(limit) = params.limit {
            found.truncate(limit as usize);
        }

        if let Some(fields) = params.fields.as_ref().and_then(Value::as_array) {
            found = found.iter().map(|record| project(record, fields)).collect();
        }

        Ok(Value::Array(found.into_iter().map(Value::Object).collect()))
    }

    fn save(&self, record: Value) -> Result<Value, StoreError> {
        let mut record = match record {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::Backend(format!(
                    "can only save objects, got {}",
                    other
                )))
            }
        };

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;

        match record.get("id").cloned() {
            Some(id) => {
                let existing = inner
                    .records
                    .iter_mut()
                    .find(|existing| existing.get("id") == Some(&id));
                match existing {
                    Some(slot) => *slot = record.clone(),
                    None => inner.records.push(record.clone()),
                }
            }
            None => {
                let id = Value::from(inner.next_id);
                inner.next_id += 1;
                record.insert("id".to_string(), id);
                inner.records.push(record.clone());
            }
        }

        Ok(Value::Object(record))
    }

    fn update_one(&self, params: UpdateParams) -> Result<Value, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("update_one"))?;

        let query = params.query().cloned();
        let found = inner
            .records
            .iter_mut()
            .find(|record| matches(query.as_ref(), record));
        match found {
            Some(record) => {
                apply_update(record, &params.update);
                Ok(Value::Object(record.clone()))
            }
            None => Ok(Value::Null),
        }
    }

    fn update_many(&self, params: UpdateParams) -> Result<Value, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("update_many"))?;

        let query = params.query().cloned();
        let mut updated: u64 = 0;
        for record in inner
            .records
            .iter_mut()
            .filter(|record| matches(query.as_ref(), record))
        {
            apply_update(record, &params.update);
            updated += 1;
        }
        Ok(Value::from(updated))
    }

    fn delete_one(&self, params: QueryParams) -> Result<Value, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete_one"))?;

        let position = inner
            .records
            .iter()
            .position(|record| matches(params.query.as_ref(), record));
        match position {
            Some(index) => Ok(Value::Object(inner.records.remove(index))),
            None => Ok(Value::Null),
        }
    }

    fn delete_many(&self, params: QueryParams) -> Result<Value, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete_many"))?;

        let before = inner.records.len();
        inner
            .records
            .retain(|record| !matches(params.query.as_ref(), record));
        Ok(Value::from((before - inner.records.len()) as u64))
    }

    fn count(&self, params: QueryParams) -> Result<Value, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("count"))?;

        let count = inner
            .records
            .iter()
            .filter(|record| matches(params.query.as_ref(), record))
            .count();
        Ok(Value::from(count as u64))
    }
}
