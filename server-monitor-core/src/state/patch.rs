//! Copy-on-write patches of a snapshot envelope
//!
//! Every helper builds a new [`Envelope`]; the receiver and its server list are
//! never touched, so an `Arc<Envelope>` handed out earlier stays valid.

use server_monitor_gateway::{Envelope, Server};

use crate::error::{CoreError, CoreResult};

pub trait SnapshotPatch {
    /// Same envelope with the server list in reverse order.
    fn reversed(&self) -> Envelope;

    /// Replaces the entry with `server.id` in place, keeping its position.
    fn with_server_replaced(&self, server: &Server) -> CoreResult<Envelope>;

    /// Puts `server` in front of the existing entries.
    fn with_server_prepended(&self, server: Server) -> Envelope;

    /// Drops the entry with `id`. Unknown ids leave the list as is.
    fn without_server(&self, id: i64) -> Envelope;

    /// This server list under the metadata (message, status, timestamp) of `response`.
    fn with_metadata_of(&self, response: &Envelope) -> Envelope;
}

impl SnapshotPatch for Envelope {
    fn reversed(&self) -> Envelope {
        self.replace_servers(servers_of(self).iter().rev().cloned().collect())
    }

    fn with_server_replaced(&self, server: &Server) -> CoreResult<Envelope> {
        let servers = servers_of(self);
        let position = servers
            .iter()
            .position(|s| s.id == server.id)
            .ok_or(CoreError::ServerNotInSnapshot(server.id))?;

        let mut patched = servers.to_vec();
        patched[position] = server.clone();
        Ok(self.replace_servers(patched))
    }

    fn with_server_prepended(&self, server: Server) -> Envelope {
        let servers = servers_of(self);
        let mut patched = Vec::with_capacity(servers.len() + 1);
        patched.push(server);
        patched.extend_from_slice(servers);
        self.replace_servers(patched)
    }

    fn without_server(&self, id: i64) -> Envelope {
        self.replace_servers(
            servers_of(self)
                .iter()
                .filter(|s| s.id != id)
                .cloned()
                .collect(),
        )
    }

    fn with_metadata_of(&self, response: &Envelope) -> Envelope {
        response.replace_servers(servers_of(self).to_vec())
    }
}

fn servers_of(envelope: &Envelope) -> &[Server] {
    envelope.servers().unwrap_or_default()
}
