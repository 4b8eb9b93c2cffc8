use async_trait::async_trait;

use crate::error::{Result, TransportError};
use crate::types::{Envelope, ServerDraft, ServerStatus, StatusFilter};

/// Backend-facing operation set.
///
/// Every call is asynchronous and single-shot: it resolves to one [`Envelope`] or one
/// [`TransportError`], never retries and cannot be cancelled once issued.
#[async_trait]
pub trait ServerGateway: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Lists every known server, in backend insertion order (`servers` payload).
    async fn list(&self) -> Result<Envelope>;

    /// Fetches one server by id (`server` payload).
    async fn get(&self, id: i64) -> Result<Envelope>;

    /// Pings the server registered under `ip_address` and returns it with its
    /// refreshed status (`server` payload).
    ///
    /// Unknown addresses and timeouts are reported as errors like any other failure.
    async fn ping(&self, ip_address: &str) -> Result<Envelope>;

    /// Queries the backend for the servers in the given status (`servers` payload).
    async fn filter_by_status(&self, status: ServerStatus) -> Result<Envelope>;

    /// Filters servers by status.
    ///
    /// [`StatusFilter::All`] returns `current` unchanged without touching the network;
    /// callers pass the snapshot they want back in that case. Any other status is
    /// answered by [`filter_by_status`](Self::filter_by_status).
    async fn filter(&self, status: StatusFilter, current: &Envelope) -> Result<Envelope> {
        match status.as_status() {
            None => {
                log::debug!("[{}] filter ALL served from the current snapshot", self.name());
                Ok(current.clone())
            }
            Some(status) => self.filter_by_status(status).await,
        }
    }

    /// Creates a server; the backend assigns the id (`server` payload).
    async fn create(&self, draft: &ServerDraft) -> Result<Envelope>;

    /// Deletes a server. The envelope is an acknowledgement only.
    async fn delete(&self, id: i64) -> Result<Envelope>;
}

/// Rejects an empty ping target before anything is sent.
pub(crate) fn require_ip_address(ip_address: &str) -> Result<&str> {
    let trimmed = ip_address.trim();
    if trimmed.is_empty() {
        return Err(TransportError::InvalidArgument {
            param: "ip_address".to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(trimmed)
}
