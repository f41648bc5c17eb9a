use std::env;
use std::path::PathBuf;

/// Registry API configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("LISTEN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("LISTEN_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_secret: required("JWT_SECRET")?,
        })
    }
}

/// Matcher service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub pattern_file: PathBuf,
    /// When set, patterns are fetched from this registry instead of `pattern_file`.
    pub registry_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl MatcherConfig {
    pub fn from_env() -> Self {
        Self {
            pattern_file: env::var("PATTERN_FILE")
                .unwrap_or_else(|_| "patterns.json".to_string())
                .into(),
            registry_url: env::var("PATTERN_REGISTRY_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            host: env::var("LISTEN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("MATCHER_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .unwrap_or(8081),
        }
    }
}

// An empty value counts as unset.
fn required(key: &str) -> Result<String, env::VarError> {
    env::var(key).and_then(|value| {
        if value.is_empty() {
            Err(env::VarError::NotPresent)
        } else {
            Ok(value)
        }
    })
}
