//! Markdown output formatting.

use crate::models::{Article, BotResponse};

/// Format a chat response as Markdown: the text, then any articles.
#[must_use]
pub fn format_response_markdown(response: &BotResponse) -> String {
    let articles = response.articles();
    if articles.is_empty() {
        return response.text().to_string();
    }

    let mut output = format!("{}\n\n", response.text());
    output.push_str(&format_articles_markdown(articles));
    output
}

/// Format a list of articles as Markdown.
#[must_use]
pub fn format_articles_markdown(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "No articles found.".to_string();
    }

    let mut output = format!("# Articles ({} shown)\n\n", articles.len());

    for (i, article) in articles.iter().enumerate() {
        output.push_str(&format_article_markdown(article, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single article as Markdown.
#[must_use]
pub fn format_article_markdown(article: &Article, index: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}. {}\n\n", index, article.title_or_default()));

    // Date and citations
    let mut meta = Vec::new();
    if !article.publication_date.is_empty() {
        meta.push(format!("**Published**: {}", article.publication_date));
    }
    meta.push(format!("**Citations**: {}", article.citation_count));
    meta.push(format!("**Topic**: {}", article.primary_topic));
    if let Some(is_oa) = article.is_open_access {
        meta.push(format!("**Open Access**: {}", if is_oa { "Yes" } else { "No" }));
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if !article.keywords.is_empty() {
        output.push_str(&format!("**Keywords**: {}\n\n", article.keywords.join(", ")));
    }

    // Impact metrics, only when reported
    let mut impact = Vec::new();
    if let Some(percentile) = article.citation_normalized_percentile {
        impact.push(format!("**Percentile**: {:.1}%", percentile * 100.0));
    }
    if let Some(fwci) = article.fwci {
        impact.push(format!("**FWCI**: {fwci:.2}"));
    }
    if !impact.is_empty() {
        output.push_str(&format!("{}\n", impact.join(" | ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageReason;

    fn article() -> Article {
        Article {
            title: "Deep Residual Learning".to_string(),
            publication_date: "2016-06-01".to_string(),
            primary_topic: "Computer Vision".to_string(),
            keywords: vec!["Residual".to_string(), "ImageNet".to_string()],
            citation_count: 150_000,
            citation_normalized_percentile: Some(0.999),
            fwci: Some(312.5),
            is_open_access: Some(true),
        }
    }

    #[test]
    fn test_format_article_markdown() {
        insta::assert_snapshot!(format_article_markdown(&article(), 1), @r"
        ## 1. Deep Residual Learning

        **Published**: 2016-06-01 | **Citations**: 150000 | **Topic**: Computer Vision | **Open Access**: Yes

        **Keywords**: Residual, ImageNet

        **Percentile**: 99.9% | **FWCI**: 312.50
        ");
    }

    #[test]
    fn test_format_article_without_metrics() {
        let mut a = article();
        a.title = String::new();
        a.keywords.clear();
        a.citation_normalized_percentile = None;
        a.fwci = None;
        a.is_open_access = None;

        let md = format_article_markdown(&a, 2);
        assert!(md.starts_with("## 2. Untitled"));
        assert!(!md.contains("Keywords"));
        assert!(!md.contains("FWCI"));
        assert!(!md.contains("Open Access"));
    }

    #[test]
    fn test_format_closed_access_article() {
        let mut a = article();
        a.is_open_access = Some(false);
        assert!(format_article_markdown(&a, 1).contains("| **Open Access**: No\n"));
    }

    #[test]
    fn test_format_message_response() {
        let md = format_response_markdown(&BotResponse::message(MessageReason::Failed));
        assert_eq!(md, "An error occurred. Please try again later.");
    }

    #[test]
    fn test_format_summary_response() {
        let response = BotResponse::summary("I found 1 article.", vec![article()]);
        let md = format_response_markdown(&response);
        assert!(md.starts_with("I found 1 article.\n\n# Articles (1 shown)"));
        assert!(md.contains("## 1. Deep Residual Learning"));
    }
}
