//! Storage trait definitions for ingredient persistence.

use super::StorageError;
use crate::models::{Ingredient, NewIngredient};

/// Persistence contract for ingredient records.
///
/// Every method maps to a single atomic statement. Dropping the returned
/// future abandons the operation.
#[async_trait::async_trait]
pub trait IngredientStore: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, StorageError>;

    /// All records, most recently created first.
    async fn get_all(&self) -> Result<Vec<Ingredient>, StorageError>;

    /// Get ingredient by ID
    async fn get_by_id(&self, id: i64) -> Result<Ingredient, StorageError>;

    /// Overwrite name, quantity, purchase date and updated timestamp.
    async fn update(&self, ingredient: &Ingredient) -> Result<(), StorageError>;

    /// Delete an ingredient
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// Short name used in logs and health output.
    fn backend_name(&self) -> &'static str;
}
