//! The query pipeline.
//!
//! A query flows one way through these stages:
//! 1. [`extract`] turns free text into a [`FilterSet`](crate::models::FilterSet)
//! 2. [`query`] serializes the filters into an OpenAlex URL
//! 3. a [`SearchGateway`] fetches the raw works payload
//! 4. [`project`] normalizes records into articles
//! 5. a [`Summarizer`] writes the conversational summary
//!
//! [`SummaryOrchestrator`] runs the stages and maps every failure to a
//! [`BotResponse`](crate::models::BotResponse).

pub mod extract;
mod orchestrator;
pub mod project;
pub mod query;

pub use extract::extract_filters;
pub use orchestrator::{Stage, SummaryOrchestrator, fallback_summary};
pub use project::project;
pub use query::{build_search_url, build_search_url_with_base, filter_param};

use crate::error::ClientResult;
use crate::models::{Article, SearchMeta, WorksResponse};

/// Fetches works for a fully built search URL.
#[async_trait::async_trait]
pub trait SearchGateway: Send + Sync {
    /// GET the URL and decode the works payload.
    ///
    /// Transport and status failures are returned as errors, never as an
    /// empty payload.
    async fn search(&self, url: &str) -> ClientResult<WorksResponse>;
}

/// Produces a conversational summary of a result set.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the search metadata and projected articles.
    ///
    /// `Ok(None)` means no usable text; the caller falls back to a template.
    async fn summarize(
        &self,
        meta: &SearchMeta,
        articles: &[Article],
    ) -> ClientResult<Option<String>>;
}
