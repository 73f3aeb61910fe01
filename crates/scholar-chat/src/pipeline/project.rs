//! Projection of raw OpenAlex records into [`Article`] view models.
//!
//! All defaulting for missing fields happens here and nowhere else.

use crate::models::{Article, UNKNOWN_TOPIC, WorkRecord};

/// Project every record, in order. Never drops a record.
#[must_use]
pub fn project(records: &[WorkRecord]) -> Vec<Article> {
    records.iter().map(Article::from).collect()
}

impl From<&WorkRecord> for Article {
    fn from(record: &WorkRecord) -> Self {
        let title = record.title.as_ref().or(record.display_name.as_ref()).cloned();

        let primary_topic = record
            .primary_topic
            .as_ref()
            .and_then(|t| t.display_name.clone())
            .unwrap_or_else(|| UNKNOWN_TOPIC.to_string());

        let keywords = record
            .keywords
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|k| k.display_name.clone())
            .collect();

        Self {
            title: title.unwrap_or_default(),
            publication_date: record.publication_date.clone().unwrap_or_default(),
            primary_topic,
            keywords,
            citation_count: record.cited_by_count.unwrap_or(0),
            citation_normalized_percentile: record
                .citation_normalized_percentile
                .as_ref()
                .and_then(|p| p.value),
            fwci: record.fwci,
            is_open_access: record.open_access.as_ref().and_then(|oa| oa.is_oa),
        }
    }
}
