//! Server configuration

use serde::{Deserialize, Serialize};

/// Site settings exposed through the public config endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name shown by clients
    pub name: String,

    /// Client-side storage backend advertised to the front end
    pub storage_type: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "LiveTV".to_string(),
            storage_type: "localstorage".to_string(),
        }
    }
}

/// Stream proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Hostname patterns the proxy may forward to
    pub allowed_domains: Vec<String>,

    /// User-Agent sent on upstream requests
    pub user_agent: String,

    /// Referer sent on upstream requests
    pub referer: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allowed_domains: crate::allowlist::AllowedDomainSet::default_domains(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            referer: "https://live.fanmingming.com/".to_string(),
        }
    }
}

/// Stream probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,

    /// Backoff step in seconds; retry n waits n * step
    pub backoff_step_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_step_secs: 1,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Site settings
    pub site: SiteConfig,

    /// Proxy settings
    pub proxy: ProxyConfig,

    /// Probe settings
    pub probe: ProbeConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            site: SiteConfig::default(),
            proxy: ProxyConfig::default(),
            probe: ProbeConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
