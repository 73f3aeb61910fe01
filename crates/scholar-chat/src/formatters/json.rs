//! JSON output formatting with token efficiency.

use serde_json::{Value, json};

use crate::models::Article;

/// Create a compact article representation for model prompts.
///
/// Drops unknown topics, empty keyword lists and unreported metrics.
#[must_use]
pub fn compact_article(article: &Article) -> Value {
    let mut obj = json!({
        "title": article.title_or_default(),
        "date": article.publication_date,
        "citations": article.citation_count,
    });

    if article.has_topic() {
        obj["topic"] = json!(article.primary_topic);
    }

    if !article.keywords.is_empty() {
        obj["keywords"] = json!(article.keywords);
    }

    if let Some(percentile) = article.citation_normalized_percentile {
        obj["percentile"] = json!(percentile);
    }

    if let Some(fwci) = article.fwci {
        obj["fwci"] = json!(fwci);
    }

    if let Some(is_oa) = article.is_open_access {
        obj["oa"] = json!(is_oa);
    }

    obj
}
