//! Fake recipe generator for testing.
//!
//! Returns a preconfigured outcome without network access and records the
//! ingredient lists it was asked about.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ollama_service::{RecipeGenerationError, RecipeGenerator};
use crate::models::{Ingredient, RecipeResponse, RecipeSuggestion};

pub struct FakeRecipeGenerator {
    outcome: Result<RecipeResponse, RecipeGenerationError>,
    calls: Mutex<Vec<Vec<Ingredient>>>,
}

impl FakeRecipeGenerator {
    /// Always succeed with `response`.
    pub fn with_response(response: RecipeResponse) -> Self {
        Self {
            outcome: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn with_error(error: RecipeGenerationError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A backend that cannot be reached.
    pub fn unreachable() -> Self {
        Self::with_error(RecipeGenerationError::Transport {
            message: "error sending request: connection refused".to_string(),
            timed_out: false,
        })
    }

    /// One fixed suggestion.
    pub fn single_suggestion() -> Self {
        Self::with_response(RecipeResponse {
            suggestions: vec![RecipeSuggestion {
                name: "Carrot soup".to_string(),
                steps: vec![
                    "Chop the carrots".to_string(),
                    "Simmer for 20 minutes".to_string(),
                    "Blend until smooth".to_string(),
                ],
                missing_items: vec!["cream".to_string()],
            }],
        })
    }

    /// Ingredient lists received so far, oldest first.
    pub async fn calls(&self) -> Vec<Vec<Ingredient>> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl RecipeGenerator for FakeRecipeGenerator {
    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<RecipeResponse, RecipeGenerationError> {
        self.calls.lock().await.push(ingredients.to_vec());
        self.outcome.clone()
    }
}
