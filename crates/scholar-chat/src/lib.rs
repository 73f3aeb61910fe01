//! Scholar Chat
//!
//! A conversational front end for the OpenAlex works API. Free-text questions
//! such as "machine learning published after 2020 with more than 50 citations"
//! are turned into structured filters, searched, and answered with a short
//! summary plus the matching articles.
//!
//! # Features
//!
//! - **Rule-based extraction**: keywords, publication years, citation counts, open access
//! - **Resilient search**: retrying HTTP client with a 5-minute response cache
//! - **Model summaries**: OpenAI-compatible completions, with a template fallback
//! - **Two surfaces**: interactive terminal chat and an HTTP `POST /chat` API
//!
//! # Example
//!
//! ```no_run
//! use scholar_chat::{config::Config, pipeline::SummaryOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let orchestrator = SummaryOrchestrator::from_config(&config)?;
//!
//!     let response = orchestrator.handle_user_query("graph neural networks since 2019").await;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod server;

pub use client::{CompletionClient, OpenAlexClient};
pub use config::Config;
pub use error::{ChatError, ClientError};
pub use models::{Article, BotResponse, FilterSet, MessageReason};
pub use pipeline::{SummaryOrchestrator, build_search_url, extract_filters};
