//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Ingredients
        crate::routes::ingredients::create_ingredient,
        crate::routes::ingredients::get_all_ingredients,
        crate::routes::ingredients::get_ingredient,
        crate::routes::ingredients::update_ingredient,
        crate::routes::ingredients::delete_ingredient,
        // Recipes
        crate::routes::recipes::get_recipe_suggestion,
        // Health
        crate::routes::health::health,
        crate::routes::health::health_db,
        crate::routes::health::health_ollama,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(
        crate::models::Ingredient,
        crate::models::CreateIngredientRequest,
        crate::models::UpdateIngredientRequest,
        crate::models::RecipeSuggestion,
        crate::models::RecipeResponse,
        crate::routes::error::ErrorResponse,
        crate::routes::health::HealthResponse,
    )),
    modifiers(&VersionAddon),
    tags(
        (name = "Ingredients", description = "Refrigerator ingredient CRUD"),
        (name = "Recipes", description = "LLM-generated dinner suggestions"),
        (name = "Health", description = "Liveness and dependency checks"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "Dinner Decider API",
        description = "Tracks refrigerator ingredients and suggests dinners from them",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080/api", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct VersionAddon;

impl Modify for VersionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Update version to match Cargo.toml version
        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    }
}
