//! Ingredient CRUD routes.

use axum::{
    Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json,
    routing::get,
};

use super::app_state::AppState;
use super::error::{ApiError, ErrorResponse};
use crate::models::{CreateIngredientRequest, Ingredient, UpdateIngredientRequest};

/// Create the ingredients router
pub fn ingredients_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_ingredients).post(create_ingredient))
        .route(
            "/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
}

/// POST /ingredients - Add a new ingredient
#[utoipa::path(
    post,
    path = "/ingredients",
    tag = "Ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 400, description = "Bad request - missing name or invalid purchase_date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    body: Result<Json<CreateIngredientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let Json(request) = body?;
    let ingredient = state.ingredient_service.create_ingredient(request).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// GET /ingredients - List all ingredients, newest first
#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "Ingredients",
    responses(
        (status = 200, description = "All ingredients (possibly empty)", body = Vec<Ingredient>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_all_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let ingredients = state.ingredient_service.get_all_ingredients().await?;
    Ok(Json(ingredients))
}

/// GET /ingredients/{id} - Get one ingredient
#[utoipa::path(
    get,
    path = "/ingredients/{id}",
    tag = "Ingredients",
    params(("id" = i64, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = Ingredient),
        (status = 400, description = "Bad request - invalid ingredient ID", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Path(id) = id?;
    let ingredient = state.ingredient_service.get_ingredient_by_id(id).await?;
    Ok(Json(ingredient))
}

/// PUT /ingredients/{id} - Partially update an ingredient
#[utoipa::path(
    put,
    path = "/ingredients/{id}",
    tag = "Ingredients",
    params(("id" = i64, Path, description = "Ingredient ID")),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Updated ingredient", body = Ingredient),
        (status = 400, description = "Bad request - invalid ID or body", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateIngredientRequest>, JsonRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let ingredient = state
        .ingredient_service
        .update_ingredient(id, request)
        .await?;
    Ok(Json(ingredient))
}

/// DELETE /ingredients/{id} - Remove an ingredient
#[utoipa::path(
    delete,
    path = "/ingredients/{id}",
    tag = "Ingredients",
    params(("id" = i64, Path, description = "Ingredient ID")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 400, description = "Bad request - invalid ingredient ID", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.ingredient_service.delete_ingredient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
