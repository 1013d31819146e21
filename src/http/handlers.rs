//! HTTP request handlers
//!
//! Implements the channel listing, public config, probe, and service
//! endpoints.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::Result;
use crate::probe::{probe_stream, ProbeReport, ProbeStatus, RetryPolicy};
use crate::state::AppState;

use super::proxy::validate_stream_url;

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProbeQuery {
    pub url: Option<String>,
}

/// Public subset of the server configuration
#[derive(Debug, Serialize)]
pub struct PublicConfig {
    #[serde(rename = "SiteName")]
    pub site_name: String,
    #[serde(rename = "StorageType")]
    pub storage_type: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("livetv-gateway v", env!("CARGO_PKG_VERSION"))
}

/// Channel listing endpoint
/// GET /api/live[?category=NAME]
///
/// Without a category, returns every category keyed by name; with one,
/// returns that category's channels. Unknown categories yield an empty
/// list rather than an error.
pub async fn live_channels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LiveQuery>,
) -> Json<serde_json::Value> {
    state.metrics.record_request("live");

    let data = match query.category {
        Some(category) => json!({
            "category": category,
            "channels": state.catalog.channels(&category),
        }),
        None => {
            let mut map = serde_json::Map::new();
            for cat in state.catalog.iter() {
                map.insert(
                    cat.name.clone(),
                    serde_json::to_value(&cat.channels).unwrap_or_default(),
                );
            }
            serde_json::Value::Object(map)
        }
    };

    Json(json!({
        "code": 200,
        "message": "success",
        "data": data,
    }))
}

/// Public config endpoint
/// GET /api/server-config
pub async fn server_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    state.metrics.record_request("server_config");

    Json(PublicConfig {
        site_name: state.config.site.name.clone(),
        storage_type: state.config.site.storage_type.clone(),
    })
}

/// Stream probe endpoint
/// GET /api/live/probe?url=...
///
/// Gated by the same allow-list as the relay so it cannot reach arbitrary
/// hosts.
pub async fn probe_channel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProbeQuery>,
) -> Result<Json<ProbeReport>> {
    state.metrics.record_request("probe");

    let url = validate_stream_url(query.url.as_deref(), &state.allowlist).map_err(|e| {
        state.metrics.record_rejection(e.reason());
        e
    })?;

    let policy = RetryPolicy::from_config(&state.config.probe);
    let report = probe_stream(&state.http_client, &url, policy).await;

    if report.status == ProbeStatus::Failed {
        state.metrics.record_probe_failure();
    }

    Ok(Json(report))
}

/// Metrics endpoint
/// GET /metrics
pub async fn metrics_export(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.export_prometheus(),
    )
}
