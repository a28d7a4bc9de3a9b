//! HTTP transport — maps HTTP requests to named-operation dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:operation` — dispatch an operation. Body = JSON input payload.
//! - `GET /health` — health check returning `{ "ok": true, "operations": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use crudbus::{CrudService, InMemoryStore, Registry};
//!
//! let registry = Arc::new(Registry::new(CrudService::new(Box::new(InMemoryStore::new()))));
//!
//! // Get the router to compose with other axum routes
//! let app = crudbus::router(registry.clone());
//!
//! // Or serve directly
//! crudbus::serve(registry, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::registry::Registry;

/// Build an axum `Router` that dispatches operations via the given registry.
pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:operation", axum::routing::post(operation_handler))
        .with_state(registry)
}

/// Serve the registry over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(registry: Arc<Registry>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(registry);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "operations": [...] }`.
async fn health_handler(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    let operations: Vec<&str> = registry.operations();
    Json(json!({ "ok": true, "operations": operations }))
}

/// `POST /:operation` — dispatch an operation with the JSON body as input.
async fn operation_handler(
    State(registry): State<Arc<Registry>>,
    Path(operation): Path<String>,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    match registry.dispatch(&operation, input) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = json!({ "error": e.to_string() });
            (status, Json(body)).into_response()
        }
    }
}
