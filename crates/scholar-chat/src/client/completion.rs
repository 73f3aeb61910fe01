//! Chat-completions client used to summarize search results.
//!
//! Speaks the OpenAI `/chat/completions` wire format, so any compatible
//! endpoint works via `OPENAI_BASE_URL`.

use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

use super::middleware;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::formatters;
use crate::models::{Article, SearchMeta};
use crate::pipeline::Summarizer;

/// Fixed system instruction for summaries.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes research articles. \
     The example output: I found 5 artificial intelligence research articles published since \
     2015, each with exactly 100 citations.";

/// Chat-completions API client.
#[derive(Clone)]
pub struct CompletionClient {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    request_timeout: Duration,
}

impl CompletionClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        Ok(Self {
            client: middleware::build_client(config, headers)?,
            api_key: config.openai_api_key.clone(),
            endpoint: format!("{}/chat/completions", config.completions_api_url),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            request_timeout: config.request_timeout,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one completion with the fixed system prompt.
    ///
    /// Returns `Ok(None)` without a request when no API key is configured,
    /// and when the model answers with empty content.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or an undecodable body.
    pub async fn complete(&self, prompt: &str) -> ClientResult<Option<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("No completion API key configured, skipping model call");
            return Ok(None);
        };

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let body = serde_json::to_string(&request)?;

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {api_key}"))
            .body(body)
            .send()
            .await
            .map_err(|e| middleware::send_error(e, self.request_timeout))?;

        let response = middleware::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;
        let completion: ChatResponse = serde_json::from_value(value).map_err(ClientError::from)?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.trim().is_empty()))
    }
}

#[async_trait::async_trait]
impl Summarizer for CompletionClient {
    async fn summarize(
        &self,
        meta: &SearchMeta,
        articles: &[Article],
    ) -> ClientResult<Option<String>> {
        if !self.has_api_key() {
            return Ok(None);
        }
        let prompt = summary_prompt(meta, articles)?;
        self.complete(&prompt).await
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("has_api_key", &self.has_api_key())
            .field("model", &self.model)
            .finish()
    }
}

/// Build the user prompt embedding result metadata and articles as JSON.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn summary_prompt(meta: &SearchMeta, articles: &[Article]) -> ClientResult<String> {
    let meta_json = serde_json::to_string(meta)?;
    let compact: Vec<_> = articles.iter().map(formatters::compact_article).collect();
    let articles_json = serde_json::to_string(&compact)?;

    Ok(format!(
        "Summarize the following search response metadata: {meta_json}. \
         These are the articles returned: {articles_json}. \
         Provide a conversational summary. The example output: I found 5 artificial \
         intelligence research articles published since 2015, each with exactly 100 citations."
    ))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
