//! Application state management

use reqwest::Client;

use crate::allowlist::AllowedDomainSet;
use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::metrics::Metrics;

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Channel catalog, immutable after startup
    pub catalog: Catalog,

    /// Upstream domain allow-list
    pub allowlist: AllowedDomainSet,

    /// Shared HTTP client for upstream requests
    pub http_client: Client,

    /// Metrics collector
    pub metrics: Metrics,
}

impl AppState {
    /// Create a new AppState with the given configuration and catalog
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let allowlist = AllowedDomainSet::new(config.proxy.allowed_domains.clone());
        Self {
            config,
            catalog,
            allowlist,
            http_client: Client::new(),
            metrics: Metrics::new(),
        }
    }

    /// Create AppState with default configuration and the demo catalog
    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default(), Catalog::default_catalog())
    }
}
