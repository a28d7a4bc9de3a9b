//! Schema — field declarations interpreted by a small conformance checker.
//!
//! A `Schema` maps field names to a declared type, a required flag, and an
//! optional default. `validate` applies two fixed policies:
//!
//! - **convert**: coercible values become the declared type (a numeric
//!   string becomes a number, a number stringifies for a string field).
//! - **strip-unknown**: fields the schema does not declare are silently
//!   removed, never an error.
//!
//! A value that cannot be coerced fails the whole validation with an error
//! naming the field and the expected type.
//!
//! ## Example
//!
//! ```ignore
//! let schema = Schema::new()
//!     .required("name", FieldType::String)
//!     .field("age", FieldType::Number);
//!
//! let record = schema.validate(&json!({ "name": "Al", "age": "30", "extra": true }))?;
//! assert_eq!(record, json!({ "name": "Al", "age": 30 }));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use super::error::ValidationError;

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    /// Accepts any value unchanged.
    Any,
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Any => "any",
        }
    }
}

/// Declaration for a single schema field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<Value>,
}

/// Structural description of the expected shape of a persisted record.
///
/// Built once, then consulted on every write-path operation.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an optional field.
    ///
    /// Uses builder pattern — returns `self` for chaining.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                required: false,
                default: None,
            },
        );
        self
    }

    /// Declare a required field.
    pub fn required(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                required: true,
                default: None,
            },
        );
        self
    }

    /// Declare an optional field with a default applied when absent.
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        default: Value,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                required: false,
                default: Some(default),
            },
        );
        self
    }

    /// Get a field declaration by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check a record against this schema.
    ///
    /// Returns the conformed record: declared fields coerced, undeclared
    /// fields stripped, defaults filled in. Field order of the input is
    /// preserved; defaulted fields are appended.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let record = value
            .as_object()
            .ok_or_else(|| ValidationError::NotAnObject(json_type(value)))?;

        let mut out = Map::new();
        for (name, field_value) in record {
            if let Some(spec) = self.fields.get(name) {
                out.insert(name.clone(), coerce(name, spec.field_type, field_value)?);
            }
        }

        for (name, spec) in &self.fields {
            if out.contains_key(name) {
                continue;
            }
            if let Some(default) = &spec.default {
                out.insert(name.clone(), default.clone());
            } else if spec.required {
                return Err(ValidationError::MissingField(name.clone()));
            }
        }

        Ok(Value::Object(out))
    }
}

/// Coerce a value to its declared type, or fail.
fn coerce(field: &str, expected: FieldType, value: &Value) -> Result<Value, ValidationError> {
    let coerced = match expected {
        FieldType::Any => Some(value.clone()),
        FieldType::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        FieldType::Number => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) => parse_number(s),
            _ => None,
        },
        FieldType::Integer => match value {
            Value::Number(n) => coerce_integer(n),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        FieldType::Object => value.is_object().then(|| value.clone()),
        FieldType::Array => value.is_array().then(|| value.clone()),
    };

    coerced.ok_or_else(|| ValidationError::InvalidType {
        field: field.to_string(),
        expected: expected.name(),
        found: json_type(value).to_string(),
    })
}

/// Parse a numeric string, preferring integer representation.
fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Value::from(u));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Number::from_f64(f).map(Value::Number),
        _ => None,
    }
}

/// Accept integral numbers; a float with no fractional part converts.
fn coerce_integer(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        return Some(Value::from(f as i64));
    }
    None
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
