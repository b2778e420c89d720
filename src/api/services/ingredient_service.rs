//! Ingredient use-cases: validation, creation and partial updates.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::models::{
    CreateIngredientRequest, Ingredient, NewIngredient, PurchaseDatePatch, UpdateIngredientRequest,
};
use crate::storage::{IngredientStore, StorageError};

const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum IngredientError {
    #[error("{0}")]
    Validation(String),
    #[error("ingredient {id} not found")]
    NotFound { id: i64 },
    #[error("failed to {action} ingredient: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: StorageError,
    },
}

impl IngredientError {
    /// Map a store failure, keeping not-found distinct.
    fn from_storage(action: &'static str, id: Option<i64>) -> impl FnOnce(StorageError) -> Self {
        move |source| match (source, id) {
            (StorageError::NotFound { .. }, Some(id)) => IngredientError::NotFound { id },
            (source, _) => IngredientError::Storage { action, source },
        }
    }
}

/// Parse a `YYYY-MM-DD` purchase date.
///
/// Only the zero-padded form is accepted; chrono alone would also take
/// `2024-1-5` or `+2024-01-15`.
pub fn parse_purchase_date(value: &str) -> Result<NaiveDate, IngredientError> {
    let invalid = |reason: String| {
        IngredientError::Validation(format!(
            "invalid purchase_date format (expected YYYY-MM-DD): {}",
            reason
        ))
    };

    let date = NaiveDate::parse_from_str(value, PURCHASE_DATE_FORMAT)
        .map_err(|e| invalid(e.to_string()))?;
    if date.format(PURCHASE_DATE_FORMAT).to_string() != value {
        return Err(invalid(format!("{:?} is not zero-padded", value)));
    }
    Ok(date)
}

/// Ingredient business rules on top of an [`IngredientStore`].
pub struct IngredientService {
    store: Arc<dyn IngredientStore>,
}

impl IngredientService {
    pub fn new(store: Arc<dyn IngredientStore>) -> Self {
        Self { store }
    }

    pub async fn create_ingredient(
        &self,
        request: CreateIngredientRequest,
    ) -> Result<Ingredient, IngredientError> {
        if request.name.trim().is_empty() {
            return Err(IngredientError::Validation("name is required".to_string()));
        }

        let purchase_date = match request.purchase_date.as_deref() {
            Some(value) if !value.is_empty() => Some(parse_purchase_date(value)?),
            _ => None,
        };

        let now = Utc::now();
        let ingredient = self
            .store
            .create(NewIngredient {
                name: request.name,
                quantity: request.quantity,
                purchase_date,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(IngredientError::from_storage("create", None))?;

        info!(id = ingredient.id, name = %ingredient.name, "Ingredient created");
        Ok(ingredient)
    }

    pub async fn get_all_ingredients(&self) -> Result<Vec<Ingredient>, IngredientError> {
        self.store
            .get_all()
            .await
            .map_err(IngredientError::from_storage("list", None))
    }

    pub async fn get_ingredient_by_id(&self, id: i64) -> Result<Ingredient, IngredientError> {
        self.store
            .get_by_id(id)
            .await
            .map_err(IngredientError::from_storage("get", Some(id)))
    }

    /// Merge the present fields of `request` into the stored record.
    pub async fn update_ingredient(
        &self,
        id: i64,
        request: UpdateIngredientRequest,
    ) -> Result<Ingredient, IngredientError> {
        let mut ingredient = self.get_ingredient_by_id(id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(IngredientError::Validation(
                    "name must not be empty".to_string(),
                ));
            }
            ingredient.name = name;
        }

        if let Some(quantity) = request.quantity {
            ingredient.quantity = quantity;
        }

        match request.purchase_date {
            PurchaseDatePatch::Unchanged => {}
            PurchaseDatePatch::Clear => ingredient.purchase_date = None,
            PurchaseDatePatch::Set(value) => {
                ingredient.purchase_date = Some(parse_purchase_date(&value)?)
            }
        }

        ingredient.updated_at = Utc::now().max(ingredient.created_at);

        self.store
            .update(&ingredient)
            .await
            .map_err(IngredientError::from_storage("update", Some(id)))?;

        info!(id, "Ingredient updated");
        Ok(ingredient)
    }

    pub async fn delete_ingredient(&self, id: i64) -> Result<(), IngredientError> {
        self.get_ingredient_by_id(id).await?;

        self.store
            .delete(id)
            .await
            .map_err(IngredientError::from_storage("delete", Some(id)))?;

        info!(id, "Ingredient deleted");
        Ok(())
    }
}
