//! Chat surfaces: an interactive terminal session and an HTTP API.

pub mod stdio;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::models::BotResponse;
use crate::pipeline::SummaryOrchestrator;

/// Chat front end over a shared orchestrator.
#[derive(Clone)]
pub struct ChatServer {
    orchestrator: Arc<SummaryOrchestrator>,
}

impl ChatServer {
    /// Create a new chat server.
    #[must_use]
    pub fn new(orchestrator: SummaryOrchestrator) -> Self {
        Self { orchestrator: Arc::new(orchestrator) }
    }

    /// Answer a single query.
    pub async fn ask_once(&self, query: &str) -> BotResponse {
        self.orchestrator.handle_user_query(query).await
    }

    /// Run an interactive session on stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting chat session on stdio");

        stdio::run_stdio(self.orchestrator).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16, max_concurrent: usize) -> anyhow::Result<()> {
        tracing::info!(port, max_concurrent, "Starting chat server in HTTP mode");

        let router = transport::create_router(self.orchestrator, max_concurrent);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for ChatServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatServer").field("orchestrator", &self.orchestrator).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Received shutdown signal");
}
