//! Configuration file support
//!
//! Loads gateway configuration, including the channel catalog, from TOML
//! files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{Catalog, Category};
use crate::config::{ProbeConfig, ProxyConfig, ServerConfig, SiteConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Site settings
    pub site: Option<SiteSettings>,
    /// Proxy settings
    pub proxy: Option<ProxySettings>,
    /// Probe settings
    pub probe: Option<ProbeSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Channel catalog, in display order
    #[serde(default)]
    pub catalog: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Site name shown by clients
    pub name: String,
    /// Client-side storage backend advertised to the front end
    pub storage_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxySettings {
    /// Hostname patterns the proxy may forward to
    pub allowed_domains: Option<Vec<String>>,
    /// User-Agent sent on upstream requests
    pub user_agent: Option<String>,
    /// Referer sent on upstream requests
    pub referer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Maximum number of retries after the initial attempt
    pub max_retries: Option<u32>,
    /// Backoff step in seconds
    pub backoff_step_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ServerConfig::default();
        Self {
            server: ServerSettings {
                host: defaults.host,
                port: defaults.port,
                cors_enabled: Some(defaults.cors_enabled),
            },
            site: Some(SiteSettings {
                name: defaults.site.name,
                storage_type: Some(defaults.site.storage_type),
            }),
            proxy: Some(ProxySettings {
                allowed_domains: Some(defaults.proxy.allowed_domains),
                user_agent: Some(defaults.proxy.user_agent),
                referer: Some(defaults.proxy.referer),
            }),
            probe: Some(ProbeSettings {
                max_retries: Some(defaults.probe.max_retries),
                backoff_step_secs: Some(defaults.probe.backoff_step_secs),
            }),
            logging: Some(LoggingSettings {
                level: defaults.log_level,
            }),
            catalog: Catalog::default_catalog().iter().cloned().collect(),
        }
    }

    /// Convert to runtime configuration and catalog
    pub fn into_parts(self) -> (ServerConfig, Catalog) {
        let site_defaults = SiteConfig::default();
        let proxy_defaults = ProxyConfig::default();
        let probe_defaults = ProbeConfig::default();

        let site = match self.site {
            Some(s) => SiteConfig {
                name: s.name,
                storage_type: s.storage_type.unwrap_or(site_defaults.storage_type),
            },
            None => site_defaults,
        };

        let proxy = match self.proxy {
            Some(p) => ProxyConfig {
                allowed_domains: p
                    .allowed_domains
                    .unwrap_or(proxy_defaults.allowed_domains),
                user_agent: p.user_agent.unwrap_or(proxy_defaults.user_agent),
                referer: p.referer.unwrap_or(proxy_defaults.referer),
            },
            None => proxy_defaults,
        };

        let probe = match self.probe {
            Some(p) => ProbeConfig {
                max_retries: p.max_retries.unwrap_or(probe_defaults.max_retries),
                backoff_step_secs: p
                    .backoff_step_secs
                    .unwrap_or(probe_defaults.backoff_step_secs),
            },
            None => probe_defaults,
        };

        let config = ServerConfig {
            host: self.server.host,
            port: self.server.port,
            site,
            proxy,
            probe,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .map(|l| l.level)
                .unwrap_or_else(|| "info".to_string()),
        };

        (config, Catalog::new(self.catalog))
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default_config();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.len(), 2);
        assert!(config.proxy.is_some());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let config = ConfigFile::default_config();

        let mut temp_file = NamedTempFile::new().unwrap();
        let content = toml::to_string_pretty(&config).unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let loaded = ConfigFile::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.server.port, config.server.port);
        assert_eq!(loaded.catalog.len(), config.catalog.len());
        assert_eq!(loaded.catalog[0].name, config.catalog[0].name);
    }

    #[test]
    fn test_into_parts() {
        let (config, catalog) = ConfigFile::default_config().into_parts();

        assert_eq!(config.port, 3000);
        assert_eq!(config.proxy.allowed_domains.len(), 7);
        assert_eq!(config.probe.max_retries, 3);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
        "#;
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        let (config, catalog) = file.into_parts();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.site.storage_type, "localstorage");
        assert_eq!(config.proxy.allowed_domains.len(), 7);
        assert!(config.cors_enabled);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_order_preserved() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [[catalog]]
            name = "First"
            channels = [
                { name = "One", url = "https://a.example/1.m3u8", logo = "https://a.example/1.png" },
            ]

            [[catalog]]
            name = "Second"
            channels = [
                { name = "Two", url = "https://a.example/2.m3u8", logo = "https://a.example/2.png" },
                { name = "Three", url = "https://a.example/3.m3u8", logo = "https://a.example/3.png" },
            ]
        "#;
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        let (_, catalog) = file.into_parts();

        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(catalog.channels("Second").len(), 2);
        assert_eq!(catalog.channels("Second")[1].name, "Three");
    }

    #[test]
    fn test_generate_default_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        generate_default_config(&path).unwrap();

        assert!(path.exists());
        let loaded = ConfigFile::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 3000);
    }
}
