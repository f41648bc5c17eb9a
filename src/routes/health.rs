//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::{AppState, MatcherState};

/// Registry readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

/// Matcher readiness probe detail.
#[derive(Debug, Serialize)]
pub struct MatcherHealth {
    pub status: String,
    pub patterns: usize,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks database connectivity.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            format!("error: {e}")
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        database: db_status,
    })
}

/// Matcher readiness — reports the size of the loaded snapshot.
pub async fn matcher_ready(State(state): State<MatcherState>) -> Json<ApiResponse<MatcherHealth>> {
    ApiResponse::success(MatcherHealth {
        status: "ok".to_string(),
        patterns: state.matcher.len(),
    })
}
