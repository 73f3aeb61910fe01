//! Scholar Chat - Entry Point
//!
//! Interactive terminal chat by default; `--transport http` serves `POST /chat`,
//! and `--query` answers a single question and exits.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_chat::{
    config::Config, formatters, pipeline::SummaryOrchestrator, server::ChatServer,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-chat")]
#[command(about = "Chat with the OpenAlex research catalogue")]
#[command(version)]
struct Cli {
    /// OpenAI API key (optional; without it summaries use a template)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Contact email for the OpenAlex polite pool
    #[arg(long, env = "OPENALEX_MAILTO")]
    mailto: Option<String>,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio")]
    transport: Transport,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Maximum concurrent chat requests (only used with --transport http)
    #[arg(long, default_value = "16")]
    max_concurrent: usize,

    /// Answer a single query and exit
    #[arg(long, short)]
    query: Option<String>,

    /// Print the one-shot answer as JSON instead of Markdown
    #[arg(long, requires = "query")]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Interactive chat on standard input/output
    #[default]
    Stdio,
    /// HTTP API
    Http,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries chat answers, so logs go to stderr
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?cli.transport,
        "Starting scholar chat"
    );

    let mut config = Config::from_env()?;
    if let Some(key) = cli.openai_api_key.filter(|k| !k.trim().is_empty()) {
        config.openai_api_key = Some(key);
    }
    if let Some(mailto) = cli.mailto.filter(|m| !m.trim().is_empty()) {
        config.mailto = Some(mailto);
    }
    if !config.has_api_key() {
        tracing::warn!("OPENAI_API_KEY not set, summaries will use the built-in template");
    }

    let server = ChatServer::new(SummaryOrchestrator::from_config(&config)?);

    if let Some(query) = cli.query {
        let response = server.ask_once(&query).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", formatters::format_response_markdown(&response));
        }
        return Ok(());
    }

    match cli.transport {
        Transport::Stdio => {
            server.run_stdio().await?;
        }
        Transport::Http => {
            server.run_http(cli.port, cli.max_concurrent).await?;
        }
    }

    Ok(())
}
