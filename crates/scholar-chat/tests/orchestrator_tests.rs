//! Orchestrator behavior with stub collaborators.
//!
//! The stubs count calls so tests can assert which network calls happen.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use scholar_chat::error::{ClientError, ClientResult};
use scholar_chat::models::{Article, BotResponse, MessageReason, SearchMeta, WorksResponse};
use scholar_chat::pipeline::{SearchGateway, Summarizer, SummaryOrchestrator};

// =============================================================================
// Stubs
// =============================================================================

#[derive(Default)]
struct StubGateway {
    payload: Option<serde_json::Value>,
    fail: bool,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubGateway {
    fn returning(payload: serde_json::Value) -> Arc<Self> {
        Arc::new(Self { payload: Some(payload), ..Self::default() })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchGateway for StubGateway {
    async fn search(&self, url: &str) -> ClientResult<WorksResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        if self.fail {
            return Err(ClientError::server(503, "upstream unavailable"));
        }
        let payload = self.payload.clone().unwrap_or_else(|| json!({}));
        Ok(serde_json::from_value(payload)?)
    }
}

#[derive(Default)]
struct StubSummarizer {
    text: Option<String>,
    fail: bool,
    calls: AtomicUsize,
    seen_articles: AtomicUsize,
}

impl StubSummarizer {
    fn silent() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn saying(text: &str) -> Arc<Self> {
        Arc::new(Self { text: Some(text.to_string()), ..Self::default() })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(
        &self,
        _meta: &SearchMeta,
        articles: &[Article],
    ) -> ClientResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_articles.store(articles.len(), Ordering::SeqCst);

        if self.fail {
            return Err(ClientError::rate_limited(30));
        }
        Ok(self.text.clone())
    }
}

fn works(count: u64, n: usize) -> serde_json::Value {
    let results: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "title": format!("Paper {i}"),
                "publication_date": "2021-05-01",
                "cited_by_count": 150 + i,
                "primary_topic": {"display_name": "Machine Learning"}
            })
        })
        .collect();
    json!({"meta": {"count": count}, "results": results})
}

fn orchestrator(
    gateway: &Arc<StubGateway>,
    summarizer: &Arc<StubSummarizer>,
) -> SummaryOrchestrator {
    SummaryOrchestrator::new(gateway.clone(), summarizer.clone())
}

// =============================================================================
// Rejection
// =============================================================================

#[tokio::test]
async fn test_unparseable_query_makes_no_calls() {
    let gateway = StubGateway::returning(works(1, 1));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("   ").await;

    assert_eq!(response, BotResponse::message(MessageReason::Unparseable));
    assert_eq!(
        response.text(),
        "Sorry, I couldn't understand your query. Please try again with specific keywords, year, or citation count."
    );
    assert_eq!(gateway.calls(), 0);
    assert_eq!(summarizer.calls(), 0);
}

// =============================================================================
// No results
// =============================================================================

#[tokio::test]
async fn test_zero_count_skips_model() {
    let gateway = StubGateway::returning(json!({"meta": {"count": 0}, "results": []}));
    let summarizer = StubSummarizer::saying("should not be used");

    let response = orchestrator(&gateway, &summarizer).handle_user_query("xyzzy").await;

    assert_eq!(
        response.text(),
        "No articles were found based on your search criteria. Please try adjusting your filters."
    );
    assert_eq!(response.reason(), Some(MessageReason::NoResults));
    assert_eq!(gateway.calls(), 1);
    assert_eq!(summarizer.calls(), 0);
}

#[tokio::test]
async fn test_missing_meta_counts_as_no_results() {
    let gateway = StubGateway::returning(json!({"results": [{"title": "orphan"}]}));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("orphans").await;

    assert_eq!(response.reason(), Some(MessageReason::NoResults));
}

#[tokio::test]
async fn test_count_without_results_is_no_results() {
    let gateway = StubGateway::returning(json!({"meta": {"count": 12}, "results": []}));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("ghosts").await;

    assert_eq!(response.reason(), Some(MessageReason::NoResults));
    assert_eq!(summarizer.calls(), 0);
}

// =============================================================================
// Summaries
// =============================================================================

#[tokio::test]
async fn test_fallback_summary_when_model_silent() {
    let gateway = StubGateway::returning(works(2, 2));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer)
        .handle_user_query("deep learning after 2020")
        .await;

    let BotResponse::Summary { summary, articles } = response else {
        panic!("expected summary");
    };
    assert_eq!(summary, "I found 2 articles related to \"deep learning\".");
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Paper 0");
    assert_eq!(summarizer.calls(), 1);
}

#[tokio::test]
async fn test_model_summary_keeps_all_articles() {
    let gateway = StubGateway::returning(works(40, 8));
    let summarizer = StubSummarizer::saying("I found 40 machine learning papers.");

    let response = orchestrator(&gateway, &summarizer).handle_user_query("machine learning").await;

    assert_eq!(response.text(), "I found 40 machine learning papers.");
    assert_eq!(response.articles().len(), 8);
    assert_eq!(summarizer.seen_articles.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn test_fallback_caps_articles() {
    let gateway = StubGateway::returning(works(1234, 8));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("AI papers").await;

    assert_eq!(
        response.text(),
        "I found 1234 articles related to \"AI papers\". Here are the first 5."
    );
    assert_eq!(response.articles().len(), 5);
    assert_eq!(response.articles()[4].title, "Paper 4");
}

#[tokio::test]
async fn test_fallback_total_never_below_results() {
    let gateway = StubGateway::returning(works(2, 8));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("tidal energy").await;

    assert_eq!(
        response.text(),
        "I found 8 articles related to \"tidal energy\". Here are the first 5."
    );
    assert_eq!(response.articles().len(), 5);
}

#[tokio::test]
async fn test_fallback_preview_is_configurable() {
    let gateway = StubGateway::returning(works(10, 10));
    let summarizer = StubSummarizer::silent();

    let response = orchestrator(&gateway, &summarizer)
        .with_fallback_preview(3)
        .handle_user_query("bees")
        .await;

    assert_eq!(response.articles().len(), 3);
}

#[tokio::test]
async fn test_blank_model_text_falls_back() {
    let gateway = StubGateway::returning(works(1, 1));
    let summarizer = StubSummarizer::saying("   \n ");

    let response = orchestrator(&gateway, &summarizer).handle_user_query("open access").await;

    assert_eq!(response.text(), "I found 1 article matching your filters.");
}

#[tokio::test]
async fn test_summarizer_error_falls_back() {
    let gateway = StubGateway::returning(works(3, 3));
    let summarizer = StubSummarizer::failing();

    let response = orchestrator(&gateway, &summarizer).handle_user_query("coral reefs").await;

    assert!(response.reason().is_none());
    assert_eq!(response.text(), "I found 3 articles related to \"coral reefs\".");
    assert_eq!(response.articles().len(), 3);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_gateway_failure_is_generic_error() {
    let gateway = StubGateway::failing();
    let summarizer = StubSummarizer::saying("unused");

    let response = orchestrator(&gateway, &summarizer).handle_user_query("anything").await;

    assert_eq!(response, BotResponse::message(MessageReason::Failed));
    assert_eq!(response.text(), "An error occurred. Please try again later.");
    assert!(!response.text().contains("503"));
    assert_eq!(summarizer.calls(), 0);
}

// =============================================================================
// Query construction and determinism
// =============================================================================

#[tokio::test]
async fn test_gateway_receives_built_url() {
    let gateway = StubGateway::returning(works(1, 1));
    let summarizer = StubSummarizer::silent();

    orchestrator(&gateway, &summarizer)
        .with_works_url("http://mock/works")
        .handle_user_query("AI papers published after 2020 with more than 100 citations")
        .await;

    let urls = gateway.urls.lock().unwrap();
    assert_eq!(
        urls.as_slice(),
        ["http://mock/works?filter=default.search:AI%20papers,publication_year:>2020,cited_by_count:>100"]
    );
}

#[tokio::test]
async fn test_identical_queries_give_identical_responses() {
    let gateway = StubGateway::returning(works(7, 7));
    let summarizer = StubSummarizer::silent();
    let orchestrator = orchestrator(&gateway, &summarizer);

    let first = orchestrator.handle_user_query("robotics since 2018").await;
    let second = orchestrator.handle_user_query("robotics since 2018").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_queries_share_orchestrator() {
    let gateway = StubGateway::returning(works(2, 2));
    let summarizer = StubSummarizer::silent();
    let orchestrator = Arc::new(orchestrator(&gateway, &summarizer));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.handle_user_query("ecology").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().articles().len(), 2);
    }
    assert_eq!(gateway.calls(), 8);
}
