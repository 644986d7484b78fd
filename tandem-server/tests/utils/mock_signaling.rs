use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{ConnectionId, ServerEvent};
use tandem_server::{SignalingError, SignalingOutput};
use tokio::sync::Mutex;

/// Mock SignalingOutput that records every delivered event.
#[derive(Clone, Default)]
pub struct MockSignalingOutput {
    sent: Arc<Mutex<Vec<(ConnectionId, ServerEvent)>>>,
}

impl MockSignalingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events delivered so far, in order.
    pub async fn sent(&self) -> Vec<(ConnectionId, ServerEvent)> {
        self.sent.lock().await.clone()
    }

    /// Events delivered to one connection.
    pub async fn sent_to(&self, connection_id: &ConnectionId) -> Vec<ServerEvent> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == connection_id)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_event(
        &self,
        connection_id: ConnectionId,
        event: ServerEvent,
    ) -> Result<(), SignalingError> {
        tracing::debug!("[MockSignaling] send_event to {}", connection_id);
        self.sent.lock().await.push((connection_id, event));
        Ok(())
    }
}
