//! Error types for the gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("missing stream URL parameter")]
    MissingUrl,

    #[error("invalid stream URL: {0}")]
    InvalidUrl(String),

    #[error("unauthorized stream domain: {0}")]
    DomainNotAllowed(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] axum::http::Error),
}

impl GatewayError {
    /// Short label for the metrics rejection counters
    pub fn reason(&self) -> &'static str {
        match self {
            GatewayError::MissingUrl => "missing_url",
            GatewayError::InvalidUrl(_) => "invalid_url",
            GatewayError::DomainNotAllowed(_) => "domain_not_allowed",
            GatewayError::Upstream(_) => "upstream_error",
            GatewayError::UpstreamStatus(_) => "upstream_status",
            GatewayError::Config(_) => "config",
            GatewayError::Io(_) => "io",
            GatewayError::Http(_) => "http",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::MissingUrl => {
                (StatusCode::BAD_REQUEST, "Missing stream URL parameter")
            }
            GatewayError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid stream URL"),
            GatewayError::DomainNotAllowed(_) => {
                (StatusCode::FORBIDDEN, "Unauthorized stream domain")
            }
            GatewayError::Upstream(_) | GatewayError::UpstreamStatus(_) => {
                (StatusCode::BAD_GATEWAY, "Failed to proxy live stream")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GatewayError::MissingUrl, StatusCode::BAD_REQUEST),
            (
                GatewayError::InvalidUrl("nope".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::DomainNotAllowed("evil.example".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                GatewayError::Upstream("connection refused".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                GatewayError::UpstreamStatus(StatusCode::NOT_FOUND),
                StatusCode::BAD_GATEWAY,
            ),
            (
                GatewayError::Config("bad".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(GatewayError::MissingUrl.reason(), "missing_url");
        assert_eq!(
            GatewayError::DomainNotAllowed("x".to_string()).reason(),
            "domain_not_allowed"
        );
    }
}
