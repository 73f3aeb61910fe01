//! Fuzzing library for scholar-chat.
//!
//! Targets cover the two places untrusted input enters the pipeline: the
//! free-text query (filter extraction and URL building) and the raw OpenAlex
//! works payload (lenient deserialization and projection).
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_extract_filters -- -max_total_time=60
//! ```

pub use scholar_chat::{models, pipeline};

/// Run the whole offline half of the pipeline over a query.
///
/// Returns the search URL so callers can assert on it.
#[must_use]
pub fn query_to_url(query: &str) -> String {
    pipeline::build_search_url(&pipeline::extract_filters(query))
}

/// Decode a works payload and project it, as the orchestrator would.
#[must_use]
pub fn payload_to_articles(data: &[u8]) -> Option<Vec<models::Article>> {
    let response = serde_json::from_slice::<models::WorksResponse>(data).ok()?;
    Some(pipeline::project(&response.results))
}
