//! API route handlers
//!
//! - `graphql`: the GraphQL endpoint and its GraphiQL page
//! - `health`: liveness and readiness probes

pub mod graphql;
pub mod health;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// API version and base info
///
/// Root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "Pokedex GraphQL",
///   "version": "0.1.0",
///   "graphql": "/api/graphql",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Pokedex GraphQL",
        "version": env!("CARGO_PKG_VERSION"),
        "graphql": state.config.graphql_path,
        "endpoints": [
            state.config.graphql_path,
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
