//! Pattern registry routes: filtered listing, lookup, create, update, delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentPrincipal;
use crate::models::filter::Filter;
use crate::models::registry_pattern::{CreatePattern, RegistryPattern, UpdatePattern};
use crate::services::registry as registry_service;
use crate::AppState;

/// GET /pattern-registry/patterns — list patterns, filtered by `attr[op]=value` pairs.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<Vec<RegistryPattern>>>, AppError> {
    let filters = Filter::from_query_pairs(&params);
    let patterns = registry_service::list(&state.db, &state.filters, &filters).await?;
    Ok(ApiResponse::success(patterns))
}

/// GET /pattern-registry/patterns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RegistryPattern>>, AppError> {
    let pattern = registry_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(pattern))
}

/// POST /pattern-registry/patterns — create a pattern owned by the caller's organization.
pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(body): Json<CreatePattern>,
) -> Result<Json<ApiResponse<RegistryPattern>>, AppError> {
    let pattern = registry_service::create(&state.db, &principal, &body).await?;
    tracing::info!(
        id = pattern.id(),
        owner = pattern.owner(),
        component = pattern.pattern().component(),
        "Pattern created"
    );
    Ok(ApiResponse::success(pattern))
}

/// POST /pattern-registry/patterns/{id} — replace the expression (owner only).
pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePattern>,
) -> Result<Json<ApiResponse<RegistryPattern>>, AppError> {
    let pattern = registry_service::update(&state.db, &principal, id, &body).await?;
    tracing::info!(id, user_id = principal.user_id, "Pattern updated");
    Ok(ApiResponse::success(pattern))
}

/// DELETE /pattern-registry/patterns/{id} — owner only.
pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    registry_service::delete(&state.db, &principal, id).await?;
    tracing::info!(id, user_id = principal.user_id, "Pattern deleted");
    Ok(StatusCode::NO_CONTENT)
}
