//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Listen port used when no address is configured and `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen addresses.
    pub listener: ListenerConfig,

    /// Engine-level middleware.
    pub engine: EngineConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Addresses to serve on (e.g. `"0.0.0.0:8080"` or `":8080"`).
    /// Empty means `:$PORT`, or `:8080` when `PORT` is unset.
    pub addresses: Vec<String>,
}

impl ListenerConfig {
    /// Addresses to bind, with the empty-list fallback applied.
    pub fn effective_addresses(&self) -> Vec<String> {
        if !self.addresses.is_empty() {
            return self.addresses.clone();
        }

        match std::env::var("PORT") {
            Ok(port) if !port.is_empty() => vec![format!(":{}", port)],
            _ => vec![format!(":{}", DEFAULT_PORT)],
        }
    }
}

/// Middleware installed on the engine for every route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-request tracing spans.
    pub logger: bool,

    /// Convert handler panics into 500 responses.
    pub recovery: bool,

    /// Request timeout in seconds; unset disables the timeout.
    pub request_timeout_secs: Option<u64>,
}

impl EngineConfig {
    /// No engine middleware at all.
    pub fn bare() -> Self {
        Self {
            logger: false,
            recovery: false,
            request_timeout_secs: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logger: true,
            recovery: true,
            request_timeout_secs: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. `info` or `flash=debug,tower_http=info`).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns `PORT` so parallel tests never race on it.
    #[test]
    fn test_effective_addresses() {
        let explicit = ListenerConfig {
            addresses: vec![":7071".into(), "127.0.0.1:7072".into()],
        };
        std::env::set_var("PORT", "9999");
        assert_eq!(explicit.effective_addresses(), [":7071", "127.0.0.1:7072"]);

        let empty = ListenerConfig::default();
        assert_eq!(empty.effective_addresses(), [":9999"]);

        std::env::remove_var("PORT");
        assert_eq!(empty.effective_addresses(), [":8080"]);

        std::env::set_var("PORT", "");
        assert_eq!(empty.effective_addresses(), [":8080"]);
        std::env::remove_var("PORT");
    }
}
