//! Raw OpenAlex works payload.
//!
//! Every field is optional and deserialized leniently: a value of the wrong
//! JSON type becomes `None` instead of failing the record, and a record that
//! is not an object becomes an empty record instead of failing the batch.
//! Defaults are applied later, in one place, by the result projector.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `GET /works`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksResponse {
    /// Result metadata (total count, paging).
    #[serde(default, deserialize_with = "lenient")]
    pub meta: Option<SearchMeta>,

    /// Works on this page.
    #[serde(default, deserialize_with = "lenient_records")]
    pub results: Vec<WorkRecord>,
}

impl WorksResponse {
    /// Total number of matching works, or 0 when the payload has no count.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.meta.as_ref().and_then(|m| m.count).unwrap_or(0)
    }

    /// True if the search matched nothing we can show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0 || self.results.is_empty()
    }
}

/// Search result metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMeta {
    /// Total number of matching works.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// Server-side query time.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub db_response_time_ms: Option<u64>,

    /// Current page (1-based).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// A single work as returned by OpenAlex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkRecord {
    /// OpenAlex ID (e.g., `https://openalex.org/W2741809807`).
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Work title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Display name (same as the title for works).
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    /// Publication date in ISO format (YYYY-MM-DD).
    #[serde(default, deserialize_with = "lenient")]
    pub publication_date: Option<String>,

    /// Publication year.
    #[serde(default, deserialize_with = "lenient")]
    pub publication_year: Option<i32>,

    /// Number of citations this work has received.
    #[serde(default, deserialize_with = "lenient")]
    pub cited_by_count: Option<u64>,

    /// Most relevant research topic.
    #[serde(default, deserialize_with = "lenient")]
    pub primary_topic: Option<Topic>,

    /// Keyword tags with relevance scores.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub keywords: Option<Vec<KeywordTag>>,

    /// Open access status.
    #[serde(default, deserialize_with = "lenient")]
    pub open_access: Option<OpenAccess>,

    /// Citation percentile normalized by field and year.
    #[serde(default, deserialize_with = "lenient")]
    pub citation_normalized_percentile: Option<Percentile>,

    /// Field-weighted citation impact.
    #[serde(default, deserialize_with = "lenient")]
    pub fwci: Option<f64>,
}

/// Research topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
}

/// Keyword tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordTag {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
}

/// Open access status of a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAccess {
    #[serde(default, deserialize_with = "lenient")]
    pub is_oa: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub oa_status: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub oa_url: Option<String>,
}

/// Normalized citation percentile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Percentile {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_in_top_1_percent: Option<bool>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_in_top_10_percent: Option<bool>,
}

/// Deserialize any JSON value, keeping it only if it converts to `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize the results array record by record.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<WorkRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// Deserialize a keyword list tag by tag, dropping tags that are not objects.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<KeywordTag>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };

    Ok(Some(
        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}
