//! Storage module for the API.
//!
//! Provides ingredient stores backed by PostgreSQL or process memory.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::InMemoryIngredientStore;
pub use postgres::PostgresIngredientStore;
pub use traits::IngredientStore;
