//! CRM.AI API client
//!
//! A single [`ApiClient`] talks to the versioned API root. The bearer
//! credential lives in a shared slot so every clone of the client sees
//! login/logout immediately; requests pick it up at build time.

pub mod auth;
pub mod backlog;
pub mod error;
pub mod projects;
pub mod statuses;
pub mod team;
pub mod wiki;

use arc_swap::ArcSwapOption;
use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default versioned path appended to the backend origin
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// CRM.AI API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credential: Arc<ArcSwapOption<String>>,
}

impl ApiClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the versioned API root every path is resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the bearer credential attached to outgoing requests
    pub fn set_credential(&self, credential: Option<&str>) {
        self.credential
            .store(credential.map(|token| Arc::new(token.to_string())));
    }

    /// The bearer credential currently attached to requests
    pub fn credential(&self) -> Option<String> {
        self.credential.load_full().map(|token| (*token).clone())
    }

    pub fn has_credential(&self) -> bool {
        self.credential.load().is_some()
    }

    /// Create a request builder, with a bearer header when a credential is set
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");
        let mut request = self.client.request(method, url);

        if let Some(token) = self.credential.load_full() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a request and decode a JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] on 401, a status-specific error
    /// for other non-2xx responses, or a transport/decoding error
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request whose successful response carries no body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::execute`], minus decoding failures
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "api request failed");
            Err(ClientError::from_status(status, &body))
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    credential: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the backend origin, e.g. `https://crm.example.com`
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the versioned API prefix (defaults to `/api/v1`)
    #[must_use]
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Start with a bearer credential already attached
    #[must_use]
    pub fn credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(token.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the base URL is missing or
    /// malformed, or a request error if the HTTP client cannot be constructed
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url '{base_url}': {e}")))?;

        let prefix = self
            .api_prefix
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        let prefix = prefix.trim_matches('/');

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/');
        let base_url = if prefix.is_empty() {
            base_url.to_string()
        } else {
            format!("{base_url}/{prefix}")
        };

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("crmai/", env!("CARGO_PKG_VERSION")).to_string()),
        );

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            credential: Arc::new(ArcSwapOption::from(self.credential.map(Arc::new))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_joined_once() {
        let client = ApiClient::builder()
            .base_url("http://localhost:8000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");

        let client = ApiClient::builder()
            .base_url("http://localhost:8000")
            .api_prefix("/api/v2/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v2");

        let client = ApiClient::builder()
            .base_url("http://localhost:8000")
            .api_prefix("")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn credential_slot_is_shared_between_clones() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let clone = client.clone();
        assert!(!clone.has_credential());

        client.set_credential(Some("abc"));
        assert_eq!(clone.credential().as_deref(), Some("abc"));

        clone.set_credential(None);
        assert!(!client.has_credential());
    }

    #[test]
    fn rejects_malformed_base_url() {
        let result = ApiClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
