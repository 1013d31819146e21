//! Allow-listed live stream relay

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

use crate::allowlist::AllowedDomainSet;
use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// Content type assumed for upstream responses that omit one
const DEFAULT_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

/// Validate a stream URL parameter against the allow-list
///
/// The URL must be an absolute http(s) URL whose hostname matches the
/// allow-list.
pub(crate) fn validate_stream_url(
    raw: Option<&str>,
    allowlist: &AllowedDomainSet,
) -> Result<Url> {
    let raw = raw.ok_or(GatewayError::MissingUrl)?;

    let url =
        Url::parse(raw).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(GatewayError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| GatewayError::InvalidUrl(format!("no host in {}", raw)))?;

    if !allowlist.is_allowed(host) {
        return Err(GatewayError::DomainNotAllowed(host.to_string()));
    }

    Ok(url)
}

/// Relay an allow-listed upstream stream
///
/// Forwards a GET with the configured User-Agent/Referer and streams the
/// upstream body back with cache-busting headers.
pub async fn live_proxy(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response> {
    state.metrics.record_request("live_proxy");

    let url = validate_stream_url(query.url.as_deref(), &state.allowlist).map_err(|e| {
        state.metrics.record_rejection(e.reason());
        e
    })?;

    tracing::info!("Proxying stream request to {}", url);

    let upstream = state
        .http_client
        .get(url.as_str())
        .header(header::USER_AGENT, &state.config.proxy.user_agent)
        .header(header::REFERER, &state.config.proxy.referer)
        .header(header::ACCEPT, "*/*")
        .send()
        .await
        .map_err(|e| {
            state.metrics.record_upstream_error();
            tracing::error!("Proxy error for {}: {}", url, e);
            GatewayError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    if !status.is_success() {
        state.metrics.record_upstream_error();
        tracing::warn!("Upstream response for {}: {}", url, status);
        return Err(GatewayError::UpstreamStatus(status));
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    // Stream the body
    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(Body::from_stream(upstream.bytes_stream()))?;

    Ok(response)
}

/// Answer bare OPTIONS requests on the proxy route
pub async fn preflight_ok() -> StatusCode {
    StatusCode::OK
}
