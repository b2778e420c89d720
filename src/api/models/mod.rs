// Models module - contains Ingredient, request DTOs and recipe suggestion types

pub mod ingredient;
pub mod recipe;

pub use ingredient::{
    CreateIngredientRequest, Ingredient, NewIngredient, PurchaseDatePatch, UpdateIngredientRequest,
};
pub use recipe::{RecipeResponse, RecipeSuggestion};
