//! Upstream service client: forwards transformed messages to POST /process.

use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Client for the upstream processing service.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
}

impl UpstreamError {
    /// True when the failure was the outbound call timing out.
    pub fn is_timeout(&self) -> bool {
        match self {
            UpstreamError::Request(e) => e.is_timeout(),
            UpstreamError::Status { .. } => false,
        }
    }
}

impl UpstreamClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// POST /process — send a transformed message as text/plain; returns the
    /// upstream response body as text.
    pub async fn process(&self, payload: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/process", self.base_url);
        let res = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "text/plain")
            .body(payload.to_string())
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }
        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = UpstreamClient::new("http://127.0.0.1:9000/".to_string(), Duration::from_secs(1));
        assert_eq!(client.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn status_error_is_not_timeout() {
        let err = UpstreamError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "upstream returned 500 Internal Server Error: boom");
    }
}
