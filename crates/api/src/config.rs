//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `REQUEST_TIMEOUT_SECS`: deadline for each order request, including
///   the catalog and payment calls it makes (default: `10`)
/// - `PAYMENT_LATENCY_MS`: simulated latency of the in-memory payment
///   processor (default: `100`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub request_timeout: Duration,
    pub payment_latency: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            payment_latency: lookup("PAYMENT_LATENCY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.payment_latency),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            request_timeout: Duration::from_secs(10),
            payment_latency: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.payment_latency, Duration::from_millis(100));
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9090"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("PAYMENT_LATENCY_MS", "0"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.payment_latency, Duration::ZERO);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            "REQUEST_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
