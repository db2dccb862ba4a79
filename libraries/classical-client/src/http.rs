//! Shared request plumbing

use crate::error::{ClientError, Result};
use crate::rate_limit::RateLimiter;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("ClassicalTagger/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by every remote service
pub(crate) fn build_http() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(ClientError::Request)
}

/// Validate a base URL and strip its trailing slash
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Send a request through `limiter`, aborting when `cancel` fires
///
/// Non-success statuses become [`ClientError::Http`] carrying the body text.
pub(crate) async fn send(
    request: RequestBuilder,
    limiter: &RateLimiter,
    cancel: &CancellationToken,
) -> Result<Response> {
    limiter.wait(cancel).await?;

    let response = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(ClientError::Cancelled),
        response = request.send() => response,
    };
    limiter.on_response();
    let response = response?;

    let status = response.status();
    debug!(url = %response.url(), status = status.as_u16(), "Response received");
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Read and decode a JSON body, aborting when `cancel` fires
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    cancel: &CancellationToken,
) -> Result<T> {
    let body = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(ClientError::Cancelled),
        body = response.bytes() => body?,
    };
    serde_json::from_slice(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_are_normalized() {
        assert_eq!(
            normalize_base_url("https://api.discogs.com/").unwrap(),
            "https://api.discogs.com"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn bad_base_urls_are_rejected() {
        for raw in ["", "   ", "not-a-url", "ftp://example.com"] {
            assert!(
                matches!(normalize_base_url(raw), Err(ClientError::InvalidUrl(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
