use crate::error::SignalingError;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ConnectionId, ServerEvent};
use tokio::sync::mpsc;
use tracing::warn;

/// Live connections and the outbound queue of each.
///
/// Every connection gets an unbounded queue drained by its own writer task,
/// so a send never waits on a slow socket and events to one connection keep
/// their order.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<DashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<ServerEvent>) {
        if self.connections.insert(connection_id, tx).is_some() {
            warn!("Connection {} was registered twice", connection_id);
        }
    }

    pub fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains_key(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Queue `event` for one connection.
    pub fn send(
        &self,
        connection_id: ConnectionId,
        event: ServerEvent,
    ) -> Result<(), SignalingError> {
        let tx = self
            .connections
            .get(&connection_id)
            .map(|entry| entry.value().clone())
            .ok_or(SignalingError::UnknownConnection(connection_id))?;

        tx.send(event)
            .map_err(|_| SignalingError::ChannelClosed(connection_id))
    }
}

#[async_trait]
impl SignalingOutput for ConnectionRegistry {
    async fn send_event(
        &self,
        connection_id: ConnectionId,
        event: ServerEvent,
    ) -> Result<(), SignalingError> {
        self.send(connection_id, event)
    }
}
