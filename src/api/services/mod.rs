//! Services module - ingredient and recipe use-cases plus the generation backend client.

pub mod fake_generator;
pub mod ingredient_service;
pub mod ollama_service;
pub mod recipe_service;

// Re-export for convenience
pub use fake_generator::FakeRecipeGenerator;
pub use ingredient_service::{IngredientError, IngredientService};
pub use ollama_service::{OllamaService, RecipeGenerationError, RecipeGenerator};
pub use recipe_service::{RecipeError, RecipeService};
