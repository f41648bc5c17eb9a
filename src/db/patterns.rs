//! MySQL implementation of [`PatternStore`] over the `patterns` table.

use sqlx::MySqlPool;

use super::PatternStore;
use crate::errors::AppError;
use crate::models::registry_pattern::{RegistryPattern, RegistryPatternRow};
use crate::services::filter::{Predicate, ValueShape};

const SELECT_PATTERNS: &str = "SELECT id, pattern, component, owner, version FROM patterns";

fn into_registry_pattern(row: RegistryPatternRow) -> Result<RegistryPattern, AppError> {
    let id = row.id;
    RegistryPattern::try_from(row)
        .map_err(|e| AppError::Internal(format!("Stored pattern {id} does not compile: {e}")))
}

impl PatternStore for MySqlPool {
    async fn insert(
        &self,
        expression: &str,
        component: &str,
        owner: i64,
    ) -> Result<RegistryPattern, AppError> {
        let result = sqlx::query(
            "INSERT INTO patterns (pattern, component, owner, version) VALUES (?, ?, ?, 1)",
        )
        .bind(expression)
        .bind(component)
        .bind(owner)
        .execute(self)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::Internal("Inserted id out of range".to_string()))?;
        self.find_by_id(id).await
    }

    async fn find_by_id(&self, id: i64) -> Result<RegistryPattern, AppError> {
        let row = sqlx::query_as::<_, RegistryPatternRow>(&format!("{SELECT_PATTERNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self)
            .await?
            .ok_or_else(|| AppError::NotFound("Pattern not found".to_string()))?;
        into_registry_pattern(row)
    }

    async fn list(&self, predicate: &Predicate) -> Result<Vec<RegistryPattern>, AppError> {
        let sql = format!("{SELECT_PATTERNS}{} ORDER BY id", predicate.where_clause());
        let mut query = sqlx::query_as::<_, RegistryPatternRow>(&sql);

        for arg in &predicate.args {
            query = match arg.shape {
                ValueShape::Number => {
                    let value: i64 = arg.raw.parse().map_err(|_| {
                        AppError::Validation(format!("Expected a number, got '{}'", arg.raw))
                    })?;
                    query.bind(value)
                }
                ValueShape::Text => query.bind(arg.raw.as_str()),
            };
        }

        query
            .fetch_all(self)
            .await?
            .into_iter()
            .map(into_registry_pattern)
            .collect()
    }

    async fn update_expression(
        &self,
        id: i64,
        expression: &str,
    ) -> Result<RegistryPattern, AppError> {
        let result = sqlx::query("UPDATE patterns SET pattern = ? WHERE id = ?")
            .bind(expression)
            .bind(id)
            .execute(self)
            .await?;

        // MySQL reports zero affected rows when the value is unchanged, so
        // existence is confirmed by the re-read instead.
        tracing::debug!(id, rows = result.rows_affected(), "Updated pattern expression");
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM patterns WHERE id = ?")
            .bind(id)
            .execute(self)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pattern not found".to_string()));
        }
        Ok(())
    }
}
