use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A food item tracked in the refrigerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-01-15")]
    pub purchase_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An ingredient that has passed validation but has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: String,
    pub purchase_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewIngredient {
    /// Attach the identifier assigned by a store.
    pub fn with_id(self, id: i64) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            quantity: self.quantity,
            purchase_date: self.purchase_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request body for `POST /ingredients`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    /// `YYYY-MM-DD`; `null`, absent or empty means no date.
    #[serde(default)]
    pub purchase_date: Option<String>,
}

/// Request body for `PUT /ingredients/{id}`.
///
/// Every field is optional. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateIngredientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    /// `YYYY-MM-DD` to set, `""` to clear, absent or `null` to keep.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub purchase_date: PurchaseDatePatch,
}

/// Tri-state update for the purchase date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PurchaseDatePatch {
    #[default]
    Unchanged,
    Clear,
    Set(String),
}

impl<'de> Deserialize<'de> for PurchaseDatePatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => PurchaseDatePatch::Unchanged,
            Some(value) if value.is_empty() => PurchaseDatePatch::Clear,
            Some(value) => PurchaseDatePatch::Set(value),
        })
    }
}
