//! Configuration for the scholar chat pipeline.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// OpenAlex works endpoint. Search URLs are `{WORKS_URL}?filter=...`.
    pub const WORKS_URL: &str = "https://api.openalex.org/works";

    /// OpenAI-compatible API root (`/chat/completions` is appended).
    pub const COMPLETIONS_API: &str = "https://api.openai.com/v1";

    /// Default summarization model.
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Completion length budget for summaries.
    pub const MAX_TOKENS: u32 = 100;

    /// Sampling temperature for summaries.
    pub const TEMPERATURE: f32 = 0.7;

    /// Results requested per search page.
    pub const PER_PAGE: u32 = 25;

    /// Articles kept in a fallback (non-model) summary.
    pub const FALLBACK_PREVIEW: usize = 5;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between OpenAlex requests (100ms = 10 req/s polite pool limit).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Retries for transient HTTP failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Pipeline configuration.
#[derive(Clone)]
pub struct Config {
    /// OpenAI API key (optional; without it summaries use the fallback template).
    pub openai_api_key: Option<String>,

    /// Contact email for the OpenAlex polite pool (optional).
    pub mailto: Option<String>,

    /// OpenAlex works endpoint (for testing with mock servers).
    pub works_api_url: String,

    /// Completions API root (for testing with mock servers).
    pub completions_api_url: String,

    /// Summarization model name.
    pub model: String,

    /// Completion token budget.
    pub max_tokens: u32,

    /// Completion temperature.
    pub temperature: f32,

    /// Results per search page.
    pub per_page: u32,

    /// Articles kept when the summary falls back to the template.
    pub fallback_preview: usize,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay before each search request.
    pub rate_limit_delay: Duration,

    /// Retries for transient HTTP failures (5xx, timeouts, connection resets).
    pub max_retries: u32,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration with optional credentials.
    #[must_use]
    pub fn new(openai_api_key: Option<String>, mailto: Option<String>) -> Self {
        Self {
            openai_api_key,
            mailto,
            works_api_url: api::WORKS_URL.to_string(),
            completions_api_url: api::COMPLETIONS_API.to_string(),
            model: api::DEFAULT_MODEL.to_string(),
            max_tokens: api::MAX_TOKENS,
            temperature: api::TEMPERATURE,
            per_page: api::PER_PAGE,
            fallback_preview: api::FALLBACK_PREVIEW,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            max_retries: api::MAX_RETRIES,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing both APIs at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            works_api_url: format!("{}/works", base_url),
            completions_api_url: format!("{}/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 0,
            cache_ttl: Duration::from_secs(0),          // No caching in tests
            cache_max_size: 0,
            ..Self::new(None, None)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENAI_API_KEY`, `OPENALEX_MAILTO`, `OPENAI_MODEL`, and the
    /// endpoint overrides `OPENALEX_API_URL` / `OPENAI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint override is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let mailto = non_empty_var("OPENALEX_MAILTO");
        let mut config = Self::new(openai_api_key, mailto);

        if let Some(model) = non_empty_var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(works) = non_empty_var("OPENALEX_API_URL") {
            config.works_api_url = validated_url("OPENALEX_API_URL", &works)?;
        }
        if let Some(completions) = non_empty_var("OPENAI_BASE_URL") {
            config.completions_api_url = validated_url("OPENAI_BASE_URL", &completions)?;
        }

        Ok(config)
    }

    /// Check if a completion API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an endpoint override, returning it without a trailing slash.
fn validated_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("{name} is not a valid URL ({raw}): {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("{name} must use http or https, got {}", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("works_api_url", &self.works_api_url)
            .field("completions_api_url", &self.completions_api_url)
            .field("model", &self.model)
            .field("per_page", &self.per_page)
            .finish()
    }
}
