//! Structured search intent extracted from a free-text query.

use serde::{Deserialize, Serialize};

/// Inclusive numeric bounds. Either side may be open.
///
/// `min <= max` is expected when both are set but not enforced; the search
/// API is left to interpret an inverted range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Upper bound (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl Range {
    /// Both bounds set.
    #[must_use]
    pub const fn between(min: u32, max: u32) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Only a lower bound.
    #[must_use]
    pub const fn at_least(min: u32) -> Self {
        Self { min: Some(min), max: None }
    }

    /// Only an upper bound.
    #[must_use]
    pub const fn at_most(max: u32) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// A single value (`min == max`).
    #[must_use]
    pub const fn exactly(value: u32) -> Self {
        Self::between(value, value)
    }

    /// True if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Filters extracted from a user's query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Free-text keywords (possibly empty).
    #[serde(default)]
    pub keywords: String,

    /// Publication year bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<Range>,

    /// Citation count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<Range>,

    /// Only open access works.
    #[serde(default)]
    pub is_open_access: bool,
}

impl FilterSet {
    /// Whether the query produced anything to search on.
    ///
    /// Queries without any signal are rejected before a network call.
    #[must_use]
    pub fn has_signal(&self) -> bool {
        !self.keywords.is_empty()
            || self.publication_year.is_some_and(|r| !r.is_unbounded())
            || self.citation_count.is_some_and(|r| !r.is_unbounded())
            || self.is_open_access
    }
}
