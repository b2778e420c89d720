//! In-memory storage backend.
//!
//! Used when no database is configured and as the store behind the HTTP
//! tests. Contents are lost when the process exits.

use super::{IngredientStore, StorageError};
use crate::models::{Ingredient, NewIngredient};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryTables {
    last_id: i64,
    ingredients: BTreeMap<i64, Ingredient>,
}

/// Ingredient store held in process memory.
#[derive(Default)]
pub struct InMemoryIngredientStore {
    tables: RwLock<MemoryTables>,
}

impl InMemoryIngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.tables.read().await.ingredients.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IngredientStore for InMemoryIngredientStore {
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, StorageError> {
        let mut tables = self.tables.write().await;
        tables.last_id += 1;
        let stored = ingredient.with_id(tables.last_id);
        tables.ingredients.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_all(&self) -> Result<Vec<Ingredient>, StorageError> {
        let tables = self.tables.read().await;
        let mut ingredients: Vec<Ingredient> = tables.ingredients.values().cloned().collect();
        ingredients.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(ingredients)
    }

    async fn get_by_id(&self, id: i64) -> Result<Ingredient, StorageError> {
        self.tables
            .read()
            .await
            .ingredients
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::ingredient_not_found(id))
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .ingredients
            .get_mut(&ingredient.id)
            .ok_or_else(|| StorageError::ingredient_not_found(ingredient.id))?;

        // created_at is immutable
        stored.name = ingredient.name.clone();
        stored.quantity = ingredient.quantity.clone();
        stored.purchase_date = ingredient.purchase_date;
        stored.updated_at = ingredient.updated_at;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .ingredients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::ingredient_not_found(id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
