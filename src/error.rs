//! Error types for facade operations and named dispatch.

use std::error::Error;
use std::fmt;

use crate::schema::ValidationError;
use crate::store::StoreError;

/// Error type for CRUD service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No operation registered under this name.
    UnknownOperation(String),
    /// The input payload failed its declared shape (missing required
    /// argument, wrong type). The store is never invoked.
    InvalidInput(String),
    /// The record failed conformance to the configured schema.
    Validation(ValidationError),
    /// Error raised by the store during delegation, propagated unchanged.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::UnknownOperation(name) => write!(f, "unknown operation: {}", name),
            ServiceError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            ServiceError::Validation(e) => write!(f, "validation failed: {}", e),
            ServiceError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Validation(e) => Some(e),
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::UnknownOperation(_) => 404,
            ServiceError::InvalidInput(_) => 400,
            ServiceError::Validation(_) => 422,
            ServiceError::Store(_) => 500,
        }
    }
}
