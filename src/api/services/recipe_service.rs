//! Recipe suggestion use-case.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::ollama_service::{RecipeGenerationError, RecipeGenerator};
use crate::models::RecipeResponse;
use crate::storage::{IngredientStore, StorageError};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to get ingredients: {0}")]
    Storage(#[source] StorageError),
    #[error("failed to generate recipe suggestion: {0}")]
    Generation(#[source] RecipeGenerationError),
}

impl RecipeError {
    /// The generation backend is unreachable or unhealthy.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RecipeError::Generation(err) if err.is_unavailable())
    }
}

/// Reads the current ingredients and asks the generator for dinner ideas.
pub struct RecipeService {
    store: Arc<dyn IngredientStore>,
    generator: Arc<dyn RecipeGenerator>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn IngredientStore>, generator: Arc<dyn RecipeGenerator>) -> Self {
        Self { store, generator }
    }

    pub async fn get_recipe_suggestion(&self) -> Result<RecipeResponse, RecipeError> {
        let ingredients = self.store.get_all().await.map_err(RecipeError::Storage)?;

        let response = self
            .generator
            .generate(&ingredients)
            .await
            .map_err(|err| {
                warn!(error = %err, "Recipe generation failed");
                RecipeError::Generation(err)
            })?;

        info!(
            ingredient_count = ingredients.len(),
            suggestion_count = response.suggestions.len(),
            "Recipe suggestions generated"
        );
        Ok(response)
    }
}
