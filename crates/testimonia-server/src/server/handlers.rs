//! HTTP handlers for the testimonies API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use testimonia_core::{CreateTestimony, Testimony, TestimonyRepository};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub testimonies: Arc<dyn TestimonyRepository>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Public testimony submission. New testimonies start in the NEW status.
pub async fn create_public_testimony(
    State(state): State<AppState>,
    Json(dto): Json<CreateTestimony>,
) -> Result<(StatusCode, Json<Testimony>), ApiError> {
    let testimony = Testimony::new(dto);
    state.testimonies.create(&testimony).await?;
    Ok((StatusCode::CREATED, Json(testimony)))
}

/// List all testimonies, newest first.
pub async fn list_testimonies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimony>>, ApiError> {
    let testimonies = state.testimonies.list().await?;
    Ok(Json(testimonies))
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Handler error: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
