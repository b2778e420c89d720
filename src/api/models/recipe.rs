use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One generated dinner proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSuggestion {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub missing_items: Vec<String>,
}

/// All suggestions produced by a single generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    #[serde(default)]
    pub suggestions: Vec<RecipeSuggestion>,
}
