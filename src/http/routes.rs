//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    health_check, live_channels, metrics_export, probe_channel, server_config, version_check,
};
use super::proxy::{live_proxy, preflight_ok};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    // Build CORS layer
    // Players fetch manifests and segments cross-origin, and Safari needs
    // explicit headers plus private network access for local development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::RANGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .allow_private_network(true)
        .max_age(Duration::from_secs(3600));

    // Build router
    let router = Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        .route("/metrics", get(metrics_export))
        // Channel listing and public config
        .route("/api/live", get(live_channels))
        .route("/api/server-config", get(server_config))
        .route("/api/live/probe", get(probe_channel))
        // Stream relay
        // Bare OPTIONS gets a 200 from the handler; the CORS layer answers
        // real preflights before the route is reached.
        .route("/api/live-proxy", get(live_proxy).options(preflight_ok))
        // Middleware
        .layer(TraceLayer::new_for_http());

    let router = if cors_enabled {
        router.layer(cors)
    } else {
        router
    };

    // State
    router.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[test]
    fn test_create_router() {
        let state = Arc::new(AppState::with_defaults());
        let _router = create_router(state);
        // Router creation successful
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let state = Arc::new(AppState::with_defaults());
        let app = create_router(state);

        // Pre-flight OPTIONS request
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/live-proxy")
            .header(header::ORIGIN, "http://localhost:8080")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("GET"));
    }

    #[tokio::test]
    async fn test_bare_options_is_ok() {
        let state = Arc::new(AppState::with_defaults());
        let app = create_router(state);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/live-proxy")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let mut config = crate::config::ServerConfig::default();
        config.cors_enabled = false;
        let state = Arc::new(AppState::new(
            config,
            crate::catalog::Catalog::default_catalog(),
        ));
        let app = create_router(state);

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:8080")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
