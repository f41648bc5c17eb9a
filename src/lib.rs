pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::services::filter::FilterRegistry;
use crate::services::matcher::Matcher;

/// Shared state of the registry API, passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: MySqlPool,
    pub config: config::AppConfig,
    pub filters: Arc<FilterRegistry>,
}

impl AppState {
    pub fn new(db: MySqlPool, config: config::AppConfig) -> Self {
        Self {
            db,
            config,
            filters: Arc::new(FilterRegistry::registry_patterns()),
        }
    }
}

/// Shared state of the matcher API: an immutable pattern snapshot.
#[derive(Debug, Clone)]
pub struct MatcherState {
    pub matcher: Matcher,
}
