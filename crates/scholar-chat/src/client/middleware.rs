//! Shared HTTP plumbing for the API clients.
//!
//! Builds the retrying reqwest client and maps HTTP status codes and
//! transport failures onto [`ClientError`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("scholar-chat/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with timeouts, pooling and retry middleware.
pub fn build_client(config: &Config, headers: HeaderMap) -> anyhow::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
        .build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Map a failed send onto a client error, surfacing timeouts explicitly.
pub fn send_error(err: reqwest_middleware::Error, timeout: Duration) -> ClientError {
    let timed_out = matches!(&err, reqwest_middleware::Error::Reqwest(e) if e.is_timeout());
    if timed_out { ClientError::Timeout(timeout) } else { ClientError::from(err) }
}

/// Handle API response status codes.
pub async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        401 | 403 => Err(ClientError::Unauthorized { status: status.as_u16() }),
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}
