//! Liveness and dependency health checks.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgPool};
use std::time::Duration;
use tracing::warn;
use utoipa::ToSchema;

use super::app_state::AppState;

const DATABASE_PING_TIMEOUT: Duration = Duration::from_secs(5);
const OLLAMA_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn ok() -> Response {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                message: None,
            }),
        )
            .into_response()
    }

    fn unavailable(message: String) -> Response {
        warn!(%message, "Health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error".to_string(),
                message: Some(message),
            }),
        )
            .into_response()
    }
}

/// Create the health router
pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/db", get(health_db))
        .route("/health/ollama", get(health_ollama))
}

/// GET /health - Liveness
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health() -> Response {
    HealthResponse::ok()
}

/// GET /health/db - Database ping with a bounded timeout
#[utoipa::path(
    get,
    path = "/health/db",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable or not configured", body = HealthResponse)
    )
)]
pub async fn health_db(State(state): State<AppState>) -> Response {
    let Some(pool) = state.database() else {
        return HealthResponse::unavailable(
            "Database not configured (using in-memory storage)".to_string(),
        );
    };

    match tokio::time::timeout(DATABASE_PING_TIMEOUT, ping(pool)).await {
        Ok(Ok(())) => HealthResponse::ok(),
        Ok(Err(e)) => HealthResponse::unavailable(format!("Database connection failed: {}", e)),
        Err(_) => HealthResponse::unavailable(format!(
            "Database connection failed: ping timed out after {:?}",
            DATABASE_PING_TIMEOUT
        )),
    }
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

/// GET /health/ollama - Probe the generation backend with an empty ingredient list
#[utoipa::path(
    get,
    path = "/health/ollama",
    tag = "Health",
    responses(
        (status = 200, description = "Generation backend answered", body = HealthResponse),
        (status = 503, description = "Generation backend failed", body = HealthResponse)
    )
)]
pub async fn health_ollama(State(state): State<AppState>) -> Response {
    match tokio::time::timeout(OLLAMA_PROBE_TIMEOUT, state.recipe_generator.generate(&[])).await {
        Ok(Ok(_)) => HealthResponse::ok(),
        Ok(Err(e)) => HealthResponse::unavailable(format!("Ollama API connection failed: {}", e)),
        Err(_) => HealthResponse::unavailable(format!(
            "Ollama API connection failed: no answer within {:?}",
            OLLAMA_PROBE_TIMEOUT
        )),
    }
}
