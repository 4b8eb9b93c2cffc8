//! `ServerGateway` trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ServerGateway, require_ip_address};
use crate::types::{Envelope, ServerDraft, ServerStatus};

use super::HttpServerGateway;

impl HttpServerGateway {
    /// Narrows a full listing down to one status, keeping backend order.
    pub(crate) fn retain_status(listing: Envelope, status: ServerStatus) -> Envelope {
        let matching: Vec<_> = listing
            .servers()
            .unwrap_or_default()
            .iter()
            .filter(|server| server.status == status)
            .cloned()
            .collect();

        let message = if matching.is_empty() {
            format!("No servers of {status} found")
        } else {
            format!("Servers filtered by {status} status")
        };

        listing.replace_servers(matching).with_message(message)
    }
}

#[async_trait]
impl ServerGateway for HttpServerGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list(&self) -> Result<Envelope> {
        self.get_envelope("").await?.expect_servers()
    }

    async fn get(&self, id: i64) -> Result<Envelope> {
        self.get_envelope(&format!("/{id}")).await?.expect_server()
    }

    async fn ping(&self, ip_address: &str) -> Result<Envelope> {
        let ip_address = require_ip_address(ip_address)?;
        let path = format!("/ping/{}", urlencoding::encode(ip_address));
        self.get_envelope(&path).await?.expect_server()
    }

    async fn filter_by_status(&self, status: ServerStatus) -> Result<Envelope> {
        let listing = self.list().await?;
        Ok(Self::retain_status(listing, status))
    }

    async fn create(&self, draft: &ServerDraft) -> Result<Envelope> {
        self.post_envelope("", draft).await?.expect_server()
    }

    async fn delete(&self, id: i64) -> Result<Envelope> {
        self.delete_envelope(&format!("/{id}")).await
    }
}
