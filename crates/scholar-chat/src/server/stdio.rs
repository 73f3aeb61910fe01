//! Interactive terminal chat.
//!
//! One query per line on stdin; Markdown answers on stdout. Logs go to
//! stderr so they never interleave with answers.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::formatters;
use crate::pipeline::SummaryOrchestrator;

/// Prompt printed before each query.
pub const PROMPT: &str = "> ";

/// Greeting printed when the session starts.
pub const GREETING: &str = "Ask about research articles (e.g. \"machine learning published after 2020 \
     with more than 50 citations\"). Type \"exit\" to quit.";

/// Run the chat loop on stdin/stdout until EOF or an exit command.
pub async fn run_stdio(orchestrator: Arc<SummaryOrchestrator>) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_session(orchestrator, stdin, stdout).await
}

/// Run the chat loop over arbitrary streams.
pub async fn run_session<R, W>(
    orchestrator: Arc<SummaryOrchestrator>,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    writer.write_all(format!("{GREETING}\n\n{PROMPT}").as_bytes()).await?;
    writer.flush().await?;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, ending session");
            break;
        }

        let query = line.trim();
        if is_exit_command(query) {
            tracing::info!("Exit requested");
            break;
        }

        if !query.is_empty() {
            let response = orchestrator.handle_user_query(query).await;
            let rendered = formatters::format_response_markdown(&response);
            writer.write_all(rendered.trim_end().as_bytes()).await?;
            writer.write_all(b"\n\n").await?;
        }

        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;
    }

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn is_exit_command(query: &str) -> bool {
    query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit")
}
