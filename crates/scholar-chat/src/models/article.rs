//! Normalized article view model.

use serde::{Deserialize, Serialize};

/// Topic shown when a work has no primary topic.
pub const UNKNOWN_TOPIC: &str = "N/A";

/// An article as presented to the chat surface.
///
/// Optional metrics stay `None` when the source did not report them, so
/// "unknown" is never confused with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article title (empty if the record had none).
    pub title: String,

    /// Publication date (YYYY-MM-DD, empty if unknown).
    pub publication_date: String,

    /// Primary research topic, or "N/A".
    pub primary_topic: String,

    /// Keyword labels in source order.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Number of citations.
    pub citation_count: u64,

    /// Field- and year-normalized citation percentile (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_normalized_percentile: Option<f64>,

    /// Field-weighted citation impact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fwci: Option<f64>,

    /// Whether the work is open access, when the source says.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open_access: Option<bool>,
}

impl Article {
    /// Get the title, falling back to "Untitled" if empty.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        if self.title.trim().is_empty() { "Untitled" } else { &self.title }
    }

    /// Check if the primary topic is known.
    #[must_use]
    pub fn has_topic(&self) -> bool {
        self.primary_topic != UNKNOWN_TOPIC
    }
}
