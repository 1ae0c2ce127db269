//! Relay HTTP server: receives plain-text messages, forwards them upstream.

use crate::config::{self, Config};
use crate::message::transform_message;
use crate::relay::protocol::{ErrorResponse, MessageResponse};
use crate::upstream::{UpstreamClient, UpstreamError};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Shared state for the relay (config plus the upstream client).
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
}

/// Run the relay server; binds to config.relay.bind:config.relay.port.
/// Fails at startup when no upstream base URL is configured (config file or
/// RELAY_UPSTREAM_URL). Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_relay(config: Config) -> Result<()> {
    let base_url = config::resolve_upstream_base_url(&config).ok_or_else(|| {
        anyhow::anyhow!(
            "no upstream base URL configured (set upstream.baseUrl or RELAY_UPSTREAM_URL)"
        )
    })?;
    let timeout = Duration::from_secs(config.upstream.timeout_secs);
    let upstream = UpstreamClient::new(base_url.clone(), timeout);
    log::info!("forwarding messages to {}/process", base_url.trim_end_matches('/'));

    let state = RelayState {
        config: Arc::new(config.clone()),
        upstream,
    };

    let app = Router::new()
        .route("/", get(health_http))
        .route("/api/message", post(relay_message))
        .with_state(state);

    let bind_addr = format!("{}:{}", config.relay.bind.trim(), config.relay.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("relay listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server exited")?;
    log::info!("relay stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// POST /api/message — the relay pipeline: read the text body, uppercase it
/// and stamp the local time, forward to the upstream /process endpoint, wrap
/// the upstream response in a MessageResponse.
async fn relay_message(State(state): State<RelayState>, body: String) -> Response {
    log::info!("received message: {}", body);
    let payload = transform_message(&body);
    match state.upstream.process(&payload).await {
        Ok(processed) => (StatusCode::OK, Json(MessageResponse::forwarded(processed))).into_response(),
        Err(e) => {
            log::warn!("forwarding failed: {}", e);
            let status = upstream_error_status(&e);
            (status, Json(ErrorResponse::forward_failed(e.to_string()))).into_response()
        }
    }
}

/// Map an upstream failure to the caller-facing status: timeouts are 504,
/// everything else (connect errors, non-2xx upstream statuses) is 502.
fn upstream_error_status(e: &UpstreamError) -> StatusCode {
    if e.is_timeout() {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<RelayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.relay.port,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_error_maps_to_bad_gateway() {
        let err = UpstreamError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        assert_eq!(upstream_error_status(&err), StatusCode::BAD_GATEWAY);
    }
}
