//! Output formatting for chat responses.
//!
//! Markdown for the terminal, compact JSON for model prompts.

mod json;
mod markdown;

pub use json::compact_article;
pub use markdown::{format_article_markdown, format_articles_markdown, format_response_markdown};
