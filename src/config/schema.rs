//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits; every field has a default so the proxy
//! runs with no configuration at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Body buffering limits.
    pub limits: LimitsConfig,
}

impl ProxyConfig {
    /// The address to bind the listener to, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host/interface to bind (e.g. "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Budget for one outbound round trip (connect + send + receive),
    /// in seconds. Exceeding it aborts the attempt.
    pub forward_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { forward_secs: 30 }
    }
}

/// Body buffering limits.
///
/// Both the inbound request body and the target's response body are fully
/// buffered before being relayed; this caps how much is held in memory.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum body size in bytes, applied to both directions.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.timeouts.forward_secs, 30);
        assert_eq!(config.limits.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
