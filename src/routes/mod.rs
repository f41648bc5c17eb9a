//! Route definitions for the registry and matcher APIs.

pub mod health;
pub mod matcher;
pub mod patterns;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{AppState, MatcherState};

/// API identifier every registry route is nested under.
pub const REGISTRY_PREFIX: &str = "/pattern-registry";

/// Registry API router. Reads are public; writes require a bearer token.
pub fn registry_router(state: AppState) -> Router {
    let pattern_routes = Router::new()
        .route("/patterns", get(patterns::list).post(patterns::create))
        .route(
            "/patterns/{id}",
            get(patterns::get_by_id)
                .post(patterns::update)
                .delete(patterns::delete),
        );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest(REGISTRY_PREFIX, pattern_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Matcher API router.
pub fn matcher_router(state: MatcherState) -> Router {
    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::matcher_ready))
        .route("/string/match", post(matcher::match_string))
        .route("/string/context/match", post(matcher::match_context))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
