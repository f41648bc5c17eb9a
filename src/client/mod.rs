//! HTTP client for the registry's public pattern listing.

use reqwest::StatusCode;

use crate::errors::ApiResponse;
use crate::models::registry_pattern::RegistryPattern;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry responded with status {0}")]
    Status(StatusCode),

    #[error("registry error {code}: {message}")]
    Api { code: String, message: String },

    #[error("registry response carried no data")]
    MissingData,
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
}

impl RegistryClient {
    /// `base_url` points at the API root, e.g. `http://registry:8080/pattern-registry`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn patterns_url(&self) -> String {
        format!("{}/patterns", self.base_url)
    }

    /// Fetch every registered pattern. Each expression is compiled on decode.
    pub async fn fetch_patterns(&self) -> Result<Vec<RegistryPattern>, ClientError> {
        let response = self.http.get(self.patterns_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body: ApiResponse<Vec<RegistryPattern>> = response.json().await?;
        if let Some(err) = body.error {
            return Err(ClientError::Api {
                code: err.code,
                message: err.message,
            });
        }
        body.data.ok_or(ClientError::MissingData)
    }
}
