//! Sequencing of one chat query through the pipeline.

use std::sync::Arc;

use super::{SearchGateway, Summarizer, build_search_url_with_base, extract_filters, project};
use crate::client::{CompletionClient, OpenAlexClient};
use crate::config::{Config, api};
use crate::error::ChatResult;
use crate::models::{Article, BotResponse, FilterSet, MessageReason, SearchMeta};

/// Where a query is in its lifecycle. Used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Filtered,
    Rejected,
    Queried,
    NoResults,
    Projected,
    SummarizedByModel,
    FallbackSummary,
    Failed,
}

impl Stage {
    /// Log-friendly name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Filtered => "filtered",
            Self::Rejected => "rejected",
            Self::Queried => "queried",
            Self::NoResults => "no_results",
            Self::Projected => "projected",
            Self::SummarizedByModel => "summarized_by_model",
            Self::FallbackSummary => "fallback_summary",
            Self::Failed => "failed",
        }
    }
}

/// Runs extraction, search, projection and summarization for a query.
///
/// Holds no per-query state, so one instance can serve concurrent queries.
pub struct SummaryOrchestrator {
    gateway: Arc<dyn SearchGateway>,
    summarizer: Arc<dyn Summarizer>,
    works_url: String,
    fallback_preview: usize,
}

impl SummaryOrchestrator {
    /// Create an orchestrator over the given collaborators, searching the
    /// public OpenAlex endpoint.
    #[must_use]
    pub fn new(gateway: Arc<dyn SearchGateway>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            gateway,
            summarizer,
            works_url: api::WORKS_URL.to_string(),
            fallback_preview: api::FALLBACK_PREVIEW,
        }
    }

    /// Build the orchestrator with real OpenAlex and completion clients.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let gateway = Arc::new(OpenAlexClient::new(config)?);
        let summarizer = Arc::new(CompletionClient::new(config)?);

        Ok(Self::new(gateway, summarizer)
            .with_works_url(config.works_api_url.clone())
            .with_fallback_preview(config.fallback_preview))
    }

    /// Search a different works endpoint.
    #[must_use]
    pub fn with_works_url(mut self, works_url: impl Into<String>) -> Self {
        self.works_url = works_url.into();
        self
    }

    /// Number of articles kept in a fallback summary.
    #[must_use]
    pub const fn with_fallback_preview(mut self, preview: usize) -> Self {
        self.fallback_preview = preview;
        self
    }

    /// Answer a chat query. Never fails; errors become a generic message.
    pub async fn handle_user_query(&self, query: &str) -> BotResponse {
        match self.run(query).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    stage = Stage::Failed.as_str(),
                    retryable = e.is_retryable(),
                    retry_after_secs = e.retry_after().map(|d| d.as_secs()),
                    error = %e,
                    "Query failed"
                );
                BotResponse::message(MessageReason::Failed)
            }
        }
    }

    async fn run(&self, query: &str) -> ChatResult<BotResponse> {
        tracing::debug!(stage = Stage::Received.as_str(), query_len = query.len(), "Query received");

        let filters = extract_filters(query);
        tracing::debug!(stage = Stage::Filtered.as_str(), ?filters, "Filters extracted");

        if !filters.has_signal() {
            tracing::info!(stage = Stage::Rejected.as_str(), "No usable filters in query");
            return Ok(BotResponse::message(MessageReason::Unparseable));
        }

        let url = build_search_url_with_base(&self.works_url, &filters);
        tracing::debug!(stage = Stage::Queried.as_str(), %url, "Searching works");

        let response = self.gateway.search(&url).await?;

        if response.is_empty() {
            tracing::info!(
                stage = Stage::NoResults.as_str(),
                count = response.total_count(),
                "Search matched no works"
            );
            return Ok(BotResponse::message(MessageReason::NoResults));
        }

        let articles = project(&response.results);
        let meta = response.meta.unwrap_or_default();
        tracing::debug!(
            stage = Stage::Projected.as_str(),
            articles = articles.len(),
            total = meta.count,
            "Results projected"
        );

        Ok(self.summarize(&filters, &meta, articles).await)
    }

    async fn summarize(
        &self,
        filters: &FilterSet,
        meta: &SearchMeta,
        articles: Vec<Article>,
    ) -> BotResponse {
        match self.summarizer.summarize(meta, &articles).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                tracing::info!(stage = Stage::SummarizedByModel.as_str(), "Summary generated");
                return BotResponse::summary(text, articles);
            }
            Ok(_) => {
                tracing::info!(stage = Stage::FallbackSummary.as_str(), "Model returned no text");
            }
            Err(e) => {
                tracing::warn!(
                    stage = Stage::FallbackSummary.as_str(),
                    retryable = e.is_retryable(),
                    retry_after_secs = e.retry_after().map(|d| d.as_secs()),
                    error = %e,
                    "Summarizer failed, using template"
                );
            }
        }

        let total = meta.count.unwrap_or(0).max(articles.len() as u64);
        let preview: Vec<Article> = articles.into_iter().take(self.fallback_preview).collect();
        let summary = fallback_summary(total, &filters.keywords, preview.len());
        BotResponse::summary(summary, preview)
    }
}

impl std::fmt::Debug for SummaryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryOrchestrator")
            .field("works_url", &self.works_url)
            .field("fallback_preview", &self.fallback_preview)
            .finish()
    }
}

/// Templated summary used when the model gives no text.
#[must_use]
pub fn fallback_summary(total: u64, keywords: &str, shown: usize) -> String {
    let noun = if total == 1 { "article" } else { "articles" };
    let scope = if keywords.is_empty() {
        "matching your filters".to_string()
    } else {
        format!("related to \"{keywords}\"")
    };

    if shown as u64 >= total {
        format!("I found {total} {noun} {scope}.")
    } else {
        format!("I found {total} {noun} {scope}. Here are the first {shown}.")
    }
}
