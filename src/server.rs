//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with the GraphQL endpoint and health checks
//! - Middleware stack (CORS, logging, request ids, timeouts, compression)
//! - Graceful shutdown handling

use crate::config::{CorsConfig, ServerConfig};
use crate::error::ServerResult;
use crate::middleware::{cors_method_guard, log_requests, request_id};
use crate::routes::{api_info, graphql, health, not_found};
use crate::state::ServerState;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, MethodRouter};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowMethods, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// The GraphQL route is the only one affected by the CORS settings. With
/// `cors_options()` present it gets, outermost first:
/// 1. CORS headers and pre-flight answers
/// 2. Method guard (rejects verbs outside `allowed_methods`)
///
/// Global middleware, outermost first:
/// 1. Tracing
/// 2. Request ID tracking
/// 3. Request logging
/// 4. Compression
/// 5. Timeout handling
/// 6. Body size limit
pub fn build_router(state: Arc<ServerState>) -> ServerResult<Router> {
    let config = state.config.clone();

    let graphql_route = graphql_route(config.cors_options())?;

    let router = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(&config.graphql_path, graphql_route)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(config.max_body_size()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(request_id))
                .layer(from_fn(log_requests))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.timeout(),
                )),
        )
        .with_state(state);

    Ok(router)
}

/// GraphQL endpoint, with or without cross-origin handling
fn graphql_route(
    cors: Option<&CorsConfig>,
) -> ServerResult<MethodRouter<Arc<ServerState>>> {
    let route = get(graphql::graphql_handler).post(graphql::graphql_handler);

    let Some(cors) = cors else {
        return Ok(route);
    };

    let layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::list(cors.methods()?))
        .allow_headers(Any);

    Ok(route
        .options(graphql::preflight)
        .layer::<_, std::convert::Infallible>(from_fn_with_state(Arc::new(cors.clone()), cors_method_guard))
        .layer(layer))
}

/// Install the JSON tracing subscriber
pub fn init_tracing(log_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .try_init();
}

/// Start the HTTP server
///
/// Loads the bundled dataset, builds the router and serves until SIGTERM or
/// Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use pokedex::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     pokedex::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing(&config.log_level);

    let state = Arc::new(ServerState::new(config.clone())?);
    let records = state.record_count();

    let app = build_router(state)?;

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting pokedex server on {} serving {} records at {}",
        addr,
        records,
        config.graphql_path
    );
    tracing::info!(
        "Timeout: {}s, Max body: {}KB",
        config.timeout_secs,
        config.max_body_size_kb
    );
    match config.cors_options() {
        Some(cors) => tracing::info!(methods = ?cors.allowed_methods, "CORS enabled"),
        None => tracing::info!("CORS disabled"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
