//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use dlt4eu_service::Config as ServiceConfig;

/// Full configuration for the dlt4eu binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Service handler settings (issuer identity and signing key).
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// HTTP listen address.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// HTTP port.
    #[serde(default = "default_http_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1".into()
}
fn default_http_port() -> u16 {
    9090
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_http_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The HTTP socket address to bind.
    pub fn http_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.http.listen_addr, self.http.port).parse()?)
    }
}
