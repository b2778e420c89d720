//! Storage error types for the ingredient stores.

use std::time::Duration;
use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// Statement failed inside the database
    #[error("Database error: {0}")]
    Database(String),
    /// Statement did not finish within the configured query timeout
    #[error("Database query timed out after {0:?}")]
    Timeout(Duration),
}

impl StorageError {
    pub fn ingredient_not_found(id: i64) -> Self {
        StorageError::NotFound {
            entity_type: "ingredient".to_string(),
            entity_id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::ConnectionError(err.to_string())
            }
            other => StorageError::Database(other.to_string()),
        }
    }
}
