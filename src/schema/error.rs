use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The record is not a JSON object.
    NotAnObject(&'static str),
    /// A required field is absent and has no default.
    MissingField(String),
    /// A field's value cannot be coerced to its declared type.
    InvalidType {
        field: String,
        expected: &'static str,
        found: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnObject(found) => {
                write!(f, "expected an object, got {}", found)
            }
            ValidationError::MissingField(field) => {
                write!(f, "missing required field: {}", field)
            }
            ValidationError::InvalidType {
                field,
                expected,
                found,
            } => write!(
                f,
                "field {} must be of type {} (got {})",
                field, expected, found
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
