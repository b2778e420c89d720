//! Application state management.
//!
//! Defines the AppState struct that holds the use-case services, the
//! generation backend and the optional database pool shared by all handlers.

use crate::config::AppConfig;
use crate::services::{IngredientService, OllamaService, RecipeGenerator, RecipeService};
use crate::storage::{InMemoryIngredientStore, IngredientStore, PostgresIngredientStore};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub ingredient_service: Arc<IngredientService>,
    pub recipe_service: Arc<RecipeService>,
    /// Generation backend, also probed by `/health/ollama`
    pub recipe_generator: Arc<dyn RecipeGenerator>,
    /// PostgreSQL connection pool (absent in in-memory mode)
    pub database: Option<PgPool>,
}

impl AppState {
    /// Wire the services around an explicit store and generator.
    pub fn new(store: Arc<dyn IngredientStore>, generator: Arc<dyn RecipeGenerator>) -> Self {
        info!(backend = store.backend_name(), "Ingredient store ready");
        Self {
            ingredient_service: Arc::new(IngredientService::new(store.clone())),
            recipe_service: Arc::new(RecipeService::new(store, generator.clone())),
            recipe_generator: generator,
            database: None,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(generator: Arc<dyn RecipeGenerator>) -> Self {
        Self::new(Arc::new(InMemoryIngredientStore::new()), generator)
    }

    pub fn with_database(mut self, pool: PgPool) -> Self {
        self.database = Some(pool);
        self
    }

    /// Build the production state: PostgreSQL (or memory) plus Ollama.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let generator: Arc<dyn RecipeGenerator> = Arc::new(
            OllamaService::new(&config.ollama).context("Failed to create Ollama client")?,
        );
        info!(
            endpoint = %config.ollama.endpoint,
            model = %config.ollama.model,
            timeout_secs = config.ollama.timeout_secs,
            "Recipe generation backend configured"
        );

        if !config.database.enabled {
            warn!("Database disabled - ingredients are kept in memory only");
            return Ok(Self::in_memory(generator));
        }

        let pool = PostgresIngredientStore::connect(&config.database).await?;
        PostgresIngredientStore::migrate(&pool).await?;

        let store: Arc<dyn IngredientStore> = Arc::new(PostgresIngredientStore::new(
            pool.clone(),
            config.database.query_timeout(),
        ));
        Ok(Self::new(store, generator).with_database(pool))
    }

    /// Get a reference to the database pool if available.
    pub fn database(&self) -> Option<&PgPool> {
        self.database.as_ref()
    }
}
