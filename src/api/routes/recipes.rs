//! Recipe suggestion routes.

use axum::{Router, extract::State, response::Json, routing::post};

use super::app_state::AppState;
use super::error::{ApiError, ErrorResponse};
use crate::models::RecipeResponse;

/// Create the recipes router
pub fn recipes_router() -> Router<AppState> {
    Router::new().route("/suggestion", post(get_recipe_suggestion))
}

/// POST /recipes/suggestion - Ask the model for dinner ideas from the stored ingredients
#[utoipa::path(
    post,
    path = "/recipes/suggestion",
    tag = "Recipes",
    responses(
        (status = 200, description = "Recipe suggestions", body = RecipeResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Generation backend unavailable", body = ErrorResponse)
    )
)]
pub async fn get_recipe_suggestion(
    State(state): State<AppState>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let response = state.recipe_service.get_recipe_suggestion().await?;
    Ok(Json(response))
}
