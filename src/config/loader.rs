//! Configuration loading from the environment.
//!
//! The runtime configuration surface is deliberately small: `HOST` and
//! `PORT` select where the listener binds, and everything else keeps its
//! default. Invalid values are logged and replaced with the default rather
//! than aborting startup.

use crate::config::schema::ProxyConfig;

/// Environment variable naming the bind host.
pub const ENV_HOST: &str = "HOST";

/// Environment variable naming the listen port.
pub const ENV_PORT: &str = "PORT";

/// Build a configuration from the process environment.
pub fn from_env() -> ProxyConfig {
    let mut config = ProxyConfig::default();

    if let Ok(host) = std::env::var(ENV_HOST) {
        if host.trim().is_empty() {
            tracing::warn!(var = ENV_HOST, "Ignoring empty bind host");
        } else {
            config.listener.host = host;
        }
    }

    if let Ok(port) = std::env::var(ENV_PORT) {
        match parse_port(&port) {
            Some(p) => config.listener.port = p,
            None => tracing::warn!(
                var = ENV_PORT,
                value = %port,
                default = config.listener.port,
                "Invalid port value, using default"
            ),
        }
    }

    config
}

/// Parse a port string, rejecting port 0 (we need a fixed listen port).
fn parse_port(raw: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) => None,
        Ok(p) => Some(p),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_ports() {
        assert_eq!(parse_port("8080"), Some(8080));
        assert_eq!(parse_port(" 3000 "), Some(3000));
        assert_eq!(parse_port("65535"), Some(65535));
    }

    #[test]
    fn rejects_invalid_ports() {
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("65536"), None);
        assert_eq!(parse_port("-1"), None);
        assert_eq!(parse_port("eighty"), None);
        assert_eq!(parse_port(""), None);
    }
}
