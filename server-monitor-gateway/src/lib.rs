//! # server-monitor-gateway
//!
//! Backend boundary of the server monitor: the wire model ([`Server`], [`Envelope`]),
//! the [`ServerGateway`] operation set and a REST implementation of it.
//!
//! ## Operations
//!
//! | Operation | Request | Payload |
//! |-----------|---------|---------|
//! | [`list`](ServerGateway::list) | `GET /server` | `servers` |
//! | [`get`](ServerGateway::get) | `GET /server/{id}` | `server` |
//! | [`ping`](ServerGateway::ping) | `GET /server/ping/{ip}` | `server` |
//! | [`filter`](ServerGateway::filter) | none for `ALL`, else `GET /server` narrowed by status | `servers` |
//! | [`create`](ServerGateway::create) | `POST /server` | `server` |
//! | [`delete`](ServerGateway::delete) | `DELETE /server/{id}` | acknowledgement |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use server_monitor_gateway::{GatewayConfig, HttpServerGateway, ServerGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::default().with_base_url("http://localhost:8080");
//!     let gateway = HttpServerGateway::new(&config)?;
//!
//!     let listing = gateway.list().await?;
//!     for server in listing.servers().unwrap_or_default() {
//!         println!("{} {} ({})", server.id, server.ip_address, server.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, TransportError>`](TransportError). Calls are
//! issued once; nothing is retried.

mod config;
mod error;
mod http_client;
mod http_gateway;
mod traits;
mod types;
mod utils;

pub use config::{
    DEFAULT_BASE_URL, ENV_BASE_URL, ENV_CONNECT_TIMEOUT, ENV_REQUEST_TIMEOUT, GatewayConfig,
};
pub use error::{Result, TransportError};
pub use http_gateway::HttpServerGateway;
pub use traits::ServerGateway;
pub use types::{Envelope, EnvelopeData, Server, ServerDraft, ServerStatus, StatusFilter};

pub use utils::datetime;
pub use utils::log_sanitizer::truncate_for_log;
