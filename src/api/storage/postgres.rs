//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the IngredientStore trait.

use super::{IngredientStore, StorageError};
use crate::config::DatabaseConfig;
use crate::models::{Ingredient, NewIngredient};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// PostgreSQL storage backend implementation.
pub struct PostgresIngredientStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresIngredientStore {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Open a connection pool and verify it with a first connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
        let options = config.connect_options().map_err(|e| {
            StorageError::ConnectionError(format!("Invalid database settings: {}", e))
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.query_timeout())
            .max_lifetime(Duration::from_secs(3600))
            .connect_with(options)
            .await
            .map_err(|e| {
                StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
            })?;

        info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "Successfully connected to database"
        );
        Ok(pool)
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(pool: &PgPool) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))
    }

    /// Bound a statement by the query timeout.
    async fn bounded<T, F>(&self, query: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => Err(StorageError::Timeout(self.query_timeout)),
        }
    }
}

#[async_trait]
impl IngredientStore for PostgresIngredientStore {
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, StorageError> {
        self.bounded(
            sqlx::query_as::<_, Ingredient>(
                r#"
                INSERT INTO ingredients (name, quantity, purchase_date, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, quantity, purchase_date, created_at, updated_at
                "#,
            )
            .bind(&ingredient.name)
            .bind(&ingredient.quantity)
            .bind(ingredient.purchase_date)
            .bind(ingredient.created_at)
            .bind(ingredient.updated_at)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn get_all(&self) -> Result<Vec<Ingredient>, StorageError> {
        self.bounded(
            sqlx::query_as::<_, Ingredient>(
                r#"
                SELECT id, name, quantity, purchase_date, created_at, updated_at
                FROM ingredients
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn get_by_id(&self, id: i64) -> Result<Ingredient, StorageError> {
        self.bounded(
            sqlx::query_as::<_, Ingredient>(
                r#"
                SELECT id, name, quantity, purchase_date, created_at, updated_at
                FROM ingredients
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| StorageError::ingredient_not_found(id))
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<(), StorageError> {
        let rows_affected = self
            .bounded(
                sqlx::query(
                    r#"
                    UPDATE ingredients
                    SET name = $1, quantity = $2, purchase_date = $3, updated_at = $4
                    WHERE id = $5
                    "#,
                )
                .bind(&ingredient.name)
                .bind(&ingredient.quantity)
                .bind(ingredient.purchase_date)
                .bind(ingredient.updated_at)
                .bind(ingredient.id)
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        if rows_affected == 0 {
            Err(StorageError::ingredient_not_found(ingredient.id))
        } else {
            Ok(())
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let rows_affected = self
            .bounded(
                sqlx::query(
                    r#"
                    DELETE FROM ingredients
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        if rows_affected == 0 {
            Err(StorageError::ingredient_not_found(id))
        } else {
            Ok(())
        }
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
