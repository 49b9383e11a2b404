//! Confluence REST API client.
//!
//! Sync HTTP client for the Confluence Server/Data Center REST API with
//! personal-access-token (bearer) authentication.

mod attachments;
mod pages;

use std::time::Duration;

use ureq::Agent;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl ConfluenceClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - Confluence server base URL
    /// * `token` - API access token
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Config`] if the base URL is not an
    /// http(s) URL or the token is empty.
    pub fn from_config(base_url: &str, token: &str) -> Result<Self, ConfluenceError> {
        if base_url.is_empty() {
            return Err(ConfluenceError::Config("base URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfluenceError::Config(
                "base URL must start with http:// or https://".into(),
            ));
        }
        if token.is_empty() {
            return Err(ConfluenceError::Config("API token cannot be empty".into()));
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        })
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Bearer authorization header value.
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
