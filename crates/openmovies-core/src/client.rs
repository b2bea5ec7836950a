//! HTTP client for catalog sources
//!
//! One GET per call, no retries and no cache. Retry policy belongs to
//! the host.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};

use crate::error::{FetchFailure, OpenMoviesError, Result};

/// Browser User-Agent sent to catalog hosts and handed to the player
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 20)
    pub timeout_secs: u64,
    /// User-Agent header (default: [`USER_AGENT`])
    pub user_agent: String,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: USER_AGENT.to_string(),
            headers: BTreeMap::new(),
        }
    }
}

/// HTTP client wrapper for fetching catalog documents
pub struct CatalogClient {
    client: reqwest::Client,
    user_agent: String,
    headers: BTreeMap<String, String>,
}

impl CatalogClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidConfig` if a configured header name or value is not valid HTTP
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                OpenMoviesError::InvalidConfig(format!("invalid header name: {}", name))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                OpenMoviesError::InvalidConfig(format!("invalid value for header {}", name))
            })?;
            default_headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers)
            .build()
            .map_err(|e| OpenMoviesError::InvalidConfig(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
            headers: config.headers,
        })
    }

    /// Fetch a catalog document as text
    ///
    /// # Errors
    /// - `FetchFailure::Http` for network, timeout or body read errors
    /// - `FetchFailure::Status` for any status other than 200 OK
    pub async fn fetch(&self, url: &Url) -> std::result::Result<String, FetchFailure> {
        tracing::debug!(%url, "fetching catalog");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%url, status = status.as_u16(), "catalog request rejected");
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "catalog fetched");
        Ok(body)
    }

    /// Headers a player needs to replay requests the way this client does
    ///
    /// Configured headers win over the default User-Agent.
    pub fn stream_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::from([("User-Agent".to_string(), self.user_agent.clone())]);
        for (name, value) in &self.headers {
            if name.eq_ignore_ascii_case("user-agent") {
                headers.remove("User-Agent");
            }
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}
