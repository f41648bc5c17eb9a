//! Database connection pool and the pattern persistence contract.

pub mod patterns;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::errors::AppError;
use crate::models::registry_pattern::RegistryPattern;
use crate::services::filter::Predicate;

/// Create a MySQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Persistence operations the registry service relies on.
///
/// Implementations perform no ownership checks; those happen in
/// [`crate::services::registry`] before any of these are called.
#[allow(async_fn_in_trait)]
pub trait PatternStore {
    /// Insert a new pattern owned by `owner` with version 1.
    async fn insert(
        &self,
        expression: &str,
        component: &str,
        owner: i64,
    ) -> Result<RegistryPattern, AppError>;

    /// Fetch one pattern, or [`AppError::NotFound`].
    async fn find_by_id(&self, id: i64) -> Result<RegistryPattern, AppError>;

    /// Fetch every pattern satisfying `predicate`.
    async fn list(&self, predicate: &Predicate) -> Result<Vec<RegistryPattern>, AppError>;

    /// Replace the expression of an existing pattern and return the stored row.
    async fn update_expression(&self, id: i64, expression: &str)
        -> Result<RegistryPattern, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
