//! Matcher service — matches submitted strings against a pattern snapshot.
//!
//! Usage: `cargo run --bin matcher`
//!
//! Loads patterns from `PATTERN_FILE` (default `patterns.json`), or from the
//! registry at `PATTERN_REGISTRY_URL` when that is set.

use std::net::SocketAddr;

use mimalloc::MiMalloc;
use pattern_registry::client::RegistryClient;
use pattern_registry::config::MatcherConfig;
use pattern_registry::services::matcher::Matcher;
use pattern_registry::{routes, MatcherState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pattern_registry=debug,matcher=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = MatcherConfig::from_env();

    let matcher = match &config.registry_url {
        Some(url) => {
            tracing::info!(registry = %url, "Loading patterns from registry");
            Matcher::from_registry(&RegistryClient::new(url.as_str())).await?
        }
        None => {
            tracing::info!(file = %config.pattern_file.display(), "Loading patterns from file");
            Matcher::load_file(&config.pattern_file)?
        }
    };
    tracing::info!(patterns = matcher.len(), "Pattern snapshot loaded");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(host = %addr, "Starting matcher API server");

    let app = routes::matcher_router(MatcherState { matcher });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
