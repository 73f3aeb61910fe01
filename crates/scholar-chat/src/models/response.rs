//! Result of running one chat query.

use serde::{Deserialize, Serialize};

use super::Article;

/// Why a query ended without articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageReason {
    /// No keywords, year, citation or open access signal in the query.
    Unparseable,
    /// The search matched nothing.
    NoResults,
    /// Something failed along the way.
    Failed,
}

impl MessageReason {
    /// The fixed text shown for this outcome.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Unparseable => {
                "Sorry, I couldn't understand your query. Please try again with specific keywords, year, or citation count."
            }
            Self::NoResults => {
                "No articles were found based on your search criteria. Please try adjusting your filters."
            }
            Self::Failed => "An error occurred. Please try again later.",
        }
    }
}

/// Response handed back to the chat surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotResponse {
    /// Terminal outcome without articles.
    Message {
        /// Outcome discriminant.
        reason: MessageReason,
        /// Text to show.
        text: String,
    },

    /// Summary plus the articles it describes.
    Summary {
        /// Conversational summary.
        summary: String,
        /// Articles in result order.
        articles: Vec<Article>,
    },
}

impl BotResponse {
    /// Create a message response with the fixed text for `reason`.
    #[must_use]
    pub fn message(reason: MessageReason) -> Self {
        Self::Message { reason, text: reason.text().to_string() }
    }

    /// Create a summary response.
    #[must_use]
    pub fn summary(summary: impl Into<String>, articles: Vec<Article>) -> Self {
        Self::Summary { summary: summary.into(), articles }
    }

    /// The text to display first (message text or summary).
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message { text, .. } => text,
            Self::Summary { summary, .. } => summary,
        }
    }

    /// Articles carried by this response (empty for messages).
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        match self {
            Self::Message { .. } => &[],
            Self::Summary { articles, .. } => articles,
        }
    }

    /// The message reason, if this is a message response.
    #[must_use]
    pub const fn reason(&self) -> Option<MessageReason> {
        match self {
            Self::Message { reason, .. } => Some(*reason),
            Self::Summary { .. } => None,
        }
    }
}
