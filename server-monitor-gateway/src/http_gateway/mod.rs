//! REST gateway for the server monitor backend

mod gateway;
mod http;

use reqwest::Client;

use crate::config::GatewayConfig;
use crate::error::Result;

/// Resource path of every operation, relative to the base URL.
pub(crate) const SERVER_RESOURCE: &str = "/server";

/// [`ServerGateway`](crate::ServerGateway) backed by the backend's `/server` REST resource.
#[derive(Debug)]
pub struct HttpServerGateway {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl HttpServerGateway {
    /// Builds a gateway with its own HTTP client configured from `config`.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Ok(Self {
            client: config.build_client()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Builds a gateway from [`GatewayConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(&GatewayConfig::from_env())
    }

    /// Backend root this gateway talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
