//! Record schema — declarative shape description with a small conformance
//! checker. Coerces convertible values to their declared type and strips
//! fields the schema does not declare.

mod error;
mod schema;

pub use error::ValidationError;
pub use schema::{FieldSpec, FieldType, Schema};
