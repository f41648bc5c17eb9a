//! Registry pattern lifecycle: create, read, filtered listing, update, delete.
//!
//! Guards run before the store is touched: expressions must compile,
//! `component` is write-once, and only the owning organization may change or
//! remove a pattern.

use crate::db::PatternStore;
use crate::errors::AppError;
use crate::models::filter::Filter;
use crate::models::pattern::compile;
use crate::models::registry_pattern::{CreatePattern, RegistryPattern, UpdatePattern};
use crate::services::auth::Principal;
use crate::services::filter::FilterRegistry;

/// Reject updates that try to change the write-once `component`.
pub fn ensure_component_unchanged(input: &UpdatePattern) -> Result<(), AppError> {
    if input.touches_component() {
        return Err(AppError::Validation(
            "component may not be updated post-create".to_string(),
        ));
    }
    Ok(())
}

/// Reject principals from any organization other than the owner.
pub fn ensure_owner(pattern: &RegistryPattern, principal: &Principal) -> Result<(), AppError> {
    if pattern.owner() != principal.organization_id {
        return Err(AppError::Forbidden(
            "May only modify patterns owned by your organization".to_string(),
        ));
    }
    Ok(())
}

/// Persist a new pattern owned by the principal's organization.
pub async fn create<S: PatternStore>(
    store: &S,
    principal: &Principal,
    input: &CreatePattern,
) -> Result<RegistryPattern, AppError> {
    compile(&input.pattern)?;
    store
        .insert(&input.pattern, &input.component, principal.organization_id)
        .await
}

pub async fn find_by_id<S: PatternStore>(store: &S, id: i64) -> Result<RegistryPattern, AppError> {
    store.find_by_id(id).await
}

/// List patterns matching every filter.
pub async fn list<S: PatternStore>(
    store: &S,
    registry: &FilterRegistry,
    filters: &[Filter],
) -> Result<Vec<RegistryPattern>, AppError> {
    let predicate = registry.translate(filters)?;
    store.list(&predicate).await
}

/// Replace a pattern's expression. The stored version counter is left as is.
pub async fn update<S: PatternStore>(
    store: &S,
    principal: &Principal,
    id: i64,
    input: &UpdatePattern,
) -> Result<RegistryPattern, AppError> {
    ensure_component_unchanged(input)?;
    compile(&input.pattern)?;

    let existing = store.find_by_id(id).await?;
    ensure_owner(&existing, principal)?;

    store.update_expression(id, &input.pattern).await
}

pub async fn delete<S: PatternStore>(
    store: &S,
    principal: &Principal,
    id: i64,
) -> Result<(), AppError> {
    let existing = store.find_by_id(id).await?;
    ensure_owner(&existing, principal)?;
    store.delete(id).await
}
