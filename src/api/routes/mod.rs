//! API routes module - organizes all route handlers.
//!
//! Business endpoints live under `/api`; health checks stay at the root.

pub mod app_state;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod openapi;
pub mod recipes;

use axum::Router;
pub use app_state::AppState;
pub use error::ApiError;

/// Create the API router combining the ingredient, recipe and OpenAPI routes.
///
/// State is applied by the caller; see [`create_router`].
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/ingredients", ingredients::ingredients_router())
        .nest("/recipes", recipes::recipes_router())
        .merge(openapi::openapi_router())
}

/// Create the complete application router with state applied.
///
/// Middleware layers (tracing, CORS) are added by the binary.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(health::health_router())
        .nest("/api", create_api_router())
        .with_state(app_state)
}
