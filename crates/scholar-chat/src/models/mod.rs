//! Data models for the chat pipeline.
//!
//! Raw OpenAlex payloads (`work`) use lenient optional fields; the view models
//! (`Article`, `BotResponse`) serialize in camelCase for the chat surface.

mod article;
mod filters;
mod response;
mod work;

pub use article::{Article, UNKNOWN_TOPIC};
pub use filters::{FilterSet, Range};
pub use response::{BotResponse, MessageReason};
pub use work::{KeywordTag, OpenAccess, Percentile, SearchMeta, Topic, WorkRecord, WorksResponse};
