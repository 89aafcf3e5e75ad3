//! HTTP client for the search endpoint.
//!
//! The client is stateless with respect to queries - each search is a
//! single GET request. Cancellation is handled by the caller aborting the
//! task driving the request future.

use async_trait::async_trait;
use reqwest::Url;

use crate::api::protocol::SearchResponse;
use crate::Result;

/// Default search endpoint (the backend the Medlook page is served from).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/search";

/// Abstraction over the search endpoint.
///
/// The widget only depends on this trait, so tests can substitute a
/// scripted backend without any network.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a search for `query`, returning at most `limit` items.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a
    /// response body that is not the expected JSON shape.
    async fn search(&self, query: &str, limit: usize) -> Result<SearchResponse>;
}

/// reqwest-based client for the `/api/search` endpoint.
pub struct HttpSearchClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchClient {
    /// Create a client against the given endpoint URL.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Default for HttpSearchClient {
    fn default() -> Self {
        // DEFAULT_ENDPOINT is a valid URL literal
        Self::new(Url::parse(DEFAULT_ENDPOINT).unwrap())
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<SearchResponse> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("q", query), ("limit", &limit.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_parses() {
        let client = HttpSearchClient::default();
        assert_eq!(client.endpoint().path(), "/api/search");
    }

    #[test]
    fn test_custom_endpoint() {
        let url = Url::parse("https://lookup.example.org/api/search").unwrap();
        let client = HttpSearchClient::new(url.clone());
        assert_eq!(client.endpoint(), &url);
    }
}
