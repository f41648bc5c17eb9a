//! Matcher routes: run the loaded pattern set against submitted bytes.

use axum::{body::Bytes, extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::pattern::PatternMatch;
use crate::MatcherState;

/// Where a submitted string came from. Informational only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StringContext {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextualizedString {
    pub base64: String,
    #[serde(default)]
    pub context: StringContext,
}

/// POST /string/match — the raw request body is the input.
pub async fn match_string(
    State(state): State<MatcherState>,
    body: Bytes,
) -> Json<ApiResponse<Vec<PatternMatch>>> {
    ApiResponse::success(state.matcher.run(&body))
}

/// POST /string/context/match — base64 input with its origin.
pub async fn match_context(
    State(state): State<MatcherState>,
    Json(input): Json<ContextualizedString>,
) -> Result<Json<ApiResponse<Vec<PatternMatch>>>, AppError> {
    let decoded = STANDARD
        .decode(input.base64.as_bytes())
        .map_err(|e| AppError::Validation(format!("Invalid base64 input: {e}")))?;

    let matches = state.matcher.run(&decoded);
    tracing::debug!(
        context_type = %input.context.kind,
        context_value = %input.context.value,
        matches = matches.len(),
        "Matched contextualized string"
    );
    Ok(ApiResponse::success(matches))
}
