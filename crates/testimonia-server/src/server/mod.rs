//! HTTP server assembly: router, middleware stack, and listener.

mod handlers;
pub mod logging_middleware;

pub use handlers::{ApiError, AppState, HealthResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::logging::HttpLogConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Get the socket address
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address: {addr}"))
    }
}

/// Build the Axum router.
///
/// Every route runs through the logging middleware; CORS is permissive (the
/// API is consumed from browsers on other origins).
pub fn build_router(state: AppState, log_config: Arc<HttpLogConfig>) -> Router {
    let api = Router::new()
        .route("/testimonies", get(handlers::list_testimonies))
        .route("/testimonies/public", post(handlers::create_public_testimony));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            log_config,
            logging_middleware::http_logging_middleware,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, router: Router) -> anyhow::Result<()> {
    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
