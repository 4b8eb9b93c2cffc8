//! Gateway configuration and HTTP client construction.

use std::env;
use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, TransportError};

/// 默认后端地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding [`GatewayConfig::base_url`].
pub const ENV_BASE_URL: &str = "SERVER_MONITOR_API_URL";
/// Environment variable overriding [`GatewayConfig::connect_timeout`] (seconds).
pub const ENV_CONNECT_TIMEOUT: &str = "SERVER_MONITOR_CONNECT_TIMEOUT_SECS";
/// Environment variable overriding [`GatewayConfig::request_timeout`] (seconds).
pub const ENV_REQUEST_TIMEOUT: &str = "SERVER_MONITOR_REQUEST_TIMEOUT_SECS";

/// Where the backend lives and how long a call may take.
///
/// Timeouts are the only bound on a call: the coordinator enforces none of its own,
/// an elapsed timeout surfaces as [`TransportError::Timeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend root, without the `/server` resource path.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `SERVER_MONITOR_*` environment variables.
    ///
    /// Unparsable timeout values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = read_secs(ENV_CONNECT_TIMEOUT) {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_secs(ENV_REQUEST_TIMEOUT) {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Replaces the base URL; a trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 创建带超时配置的 HTTP Client
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| TransportError::Network {
                detail: format!("Failed to create HTTP client: {e}"),
            })
    }
}

fn read_secs(var: &str) -> Option<u64> {
    let raw = env::var(var).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            log::warn!("Ignoring {var}={raw}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_client_constants() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = GatewayConfig::default().with_base_url("http://monitor.local:9000/");
        assert_eq!(config.base_url, "http://monitor.local:9000");
    }

    #[test]
    fn builds_client() {
        let config = GatewayConfig::default().with_request_timeout(Duration::from_secs(2));
        assert!(config.build_client().is_ok());
    }
}
