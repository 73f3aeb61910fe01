//! Rule-based extraction of search filters from free text.
//!
//! Each rule is a pure function over the raw query; rules never see each
//! other's output. Overlapping trigger words are therefore allowed: in
//! "deep learning with more than 10 citations" the keyword span stops at
//! "with" while the citation rule still reads "more than 10 citations".

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::{FilterSet, Range};

/// Words that end the keyword span.
static KEYWORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:published|citations|open|year|before|after|with|more|less|than|exactly|greater)\b",
    )
    .expect("valid keyword boundary regex")
});

/// `[published] (after|before|in|since|between) YYYY [(and|to) YYYY]`
static PUBLICATION_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:published\s+)?(after|before|in|since|between)\s+([0-9]{4})\b(?:\s*(?:and|to)\s*([0-9]{4})\b)?",
    )
    .expect("valid publication year regex")
});

/// `(more than|greater than|less than|more|less|than|exactly|with) N [(to|and) M] citation[s]`
static CITATION_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(more|greater|less)\s+than|more|less|than|exactly|with)\s+([0-9]+)(?:\s*(?:to|and)\s*([0-9]+))?\s*citations?\b",
    )
    .expect("valid citation count regex")
});

static OPEN_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bopen\s+access\b").expect("valid open access regex"));

/// Extract a [`FilterSet`] from a free-text query.
///
/// Never fails: a rule that finds nothing leaves its field absent (or
/// `false`). Rules run in a fixed order but are independent of each other.
#[must_use]
pub fn extract_filters(query: &str) -> FilterSet {
    FilterSet {
        keywords: keywords(query),
        publication_year: publication_year(query),
        citation_count: citation_count(query),
        is_open_access: open_access(query),
    }
}

/// Text before the first boundary word, or the whole query if there is none.
#[must_use]
pub fn keywords(query: &str) -> String {
    let span = KEYWORD_BOUNDARY.find(query).map_or(query, |m| &query[..m.start()]);
    span.trim().to_string()
}

/// Publication year bounds implied by a temporal phrase.
#[must_use]
pub fn publication_year(query: &str) -> Option<Range> {
    let caps = PUBLICATION_YEAR.captures(query)?;
    let first = number(&caps, 2)?;

    if caps.get(3).is_some() {
        return Some(Range::between(first, number(&caps, 3)?));
    }

    let relation = caps.get(1)?.as_str().to_ascii_lowercase();
    Some(match relation.as_str() {
        "after" | "since" => Range::at_least(first),
        "before" => Range::at_most(first),
        // "in", or "between" with a single year
        _ => Range::exactly(first),
    })
}

/// Citation count bounds implied by a comparison phrase.
#[must_use]
pub fn citation_count(query: &str) -> Option<Range> {
    let caps = CITATION_COUNT.captures(query)?;
    let first = number(&caps, 2)?;

    if caps.get(3).is_some() {
        return Some(Range::between(first, number(&caps, 3)?));
    }

    let comparator = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
    Some(match comparator.as_deref() {
        Some("more" | "greater") => Range::at_least(first),
        Some("less") => Range::at_most(first),
        _ => Range::exactly(first),
    })
}

/// Whether the query asks for open access works.
#[must_use]
pub fn open_access(query: &str) -> bool {
    OPEN_ACCESS.is_match(query)
}

/// Parse a numeric capture. Values that overflow `u32` count as no match.
fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}
