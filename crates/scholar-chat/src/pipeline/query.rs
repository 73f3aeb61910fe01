//! Serialization of a [`FilterSet`] into an OpenAlex works URL.
//!
//! Fragments are emitted in a fixed order (keywords, year, citations, open
//! access) and joined with `,`, so equal filter sets always produce
//! byte-identical URLs.

use crate::config::api;
use crate::models::{FilterSet, Range};

/// Separator between filter fragments.
pub const FILTER_SEPARATOR: &str = ",";

/// Build the search URL against the public OpenAlex endpoint.
#[must_use]
pub fn build_search_url(filters: &FilterSet) -> String {
    build_search_url_with_base(api::WORKS_URL, filters)
}

/// Build the search URL against a custom works endpoint.
#[must_use]
pub fn build_search_url_with_base(base: &str, filters: &FilterSet) -> String {
    format!("{}?filter={}", base, filter_param(filters))
}

/// The value of the `filter` query parameter.
#[must_use]
pub fn filter_param(filters: &FilterSet) -> String {
    let fragments: Vec<String> = [
        keywords_fragment(&filters.keywords),
        filters.publication_year.and_then(|r| range_fragment("publication_year", r)),
        filters.citation_count.and_then(|r| range_fragment("cited_by_count", r)),
        filters.is_open_access.then(|| "is_oa:true".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    fragments.join(FILTER_SEPARATOR)
}

fn keywords_fragment(keywords: &str) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }
    Some(format!("default.search:{}", urlencoding::encode(keywords)))
}

fn range_fragment(field: &str, range: Range) -> Option<String> {
    match (range.min, range.max) {
        (Some(min), Some(max)) => Some(format!("{field}:{min}-{max}")),
        (Some(min), None) => Some(format!("{field}:>{min}")),
        (None, Some(max)) => Some(format!("{field}:<{max}")),
        (None, None) => None,
    }
}
