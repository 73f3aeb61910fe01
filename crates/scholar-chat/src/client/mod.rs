//! API clients: the OpenAlex search gateway and the completion model.
//!
//! The OpenAlex client provides:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Polite-pool pacing (10 req/s) and `mailto` identification
//! - Response caching with 5-minute TTL

mod completion;
pub mod middleware;

pub use completion::{CompletionClient, SYSTEM_PROMPT, summary_prompt};

use std::time::Duration;

use moka::future::Cache;
use reqwest_middleware::ClientWithMiddleware;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::WorksResponse;
use crate::pipeline::SearchGateway;

/// OpenAlex works API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// Polite-pool contact email (optional).
    mailto: Option<String>,

    /// Results per page.
    per_page: u32,

    /// Request timeout (reported on timeouts).
    request_timeout: Duration,

    /// Rate limit delay.
    rate_limit_delay: Duration,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "application/json".parse().expect("valid accept header"),
        );

        let client = middleware::build_client(config, headers)?;

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            mailto: config.mailto.clone(),
            per_page: config.per_page,
            request_timeout: config.request_timeout,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if a polite-pool email is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// Fetch one page of works for a search URL built by the query builder.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or an undecodable body.
    pub async fn search_works(&self, url: &str) -> ClientResult<WorksResponse> {
        let mut params = vec![("per_page".to_string(), self.per_page.to_string())];

        if let Some(ref mailto) = self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        self.get(url, &params).await
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Check cache
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::debug!(%url, "Cache hit");
            return serde_json::from_value(cached).map_err(ClientError::from);
        }

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| middleware::send_error(e, self.request_timeout))?;

        let response = middleware::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        // Cache response
        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

#[async_trait::async_trait]
impl SearchGateway for OpenAlexClient {
    async fn search(&self, url: &str) -> ClientResult<WorksResponse> {
        self.search_works(url).await
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("has_mailto", &self.has_mailto())
            .field("per_page", &self.per_page)
            .finish()
    }
}
