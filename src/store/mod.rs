//! Store — the capability set the facade delegates to.
//!
//! A `Store` is any backend exposing the nine CRUD methods over opaque JSON
//! records. The facade depends only on this trait, never on a concrete
//! implementation. `InMemoryStore` is a HashMap-style reference backend for
//! tests and development.

mod error;
mod in_memory;
mod params;
mod store;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use params::{FindManyParams, QueryParams, UpdateParams};
pub use store::Store;
