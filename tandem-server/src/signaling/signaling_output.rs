use crate::error::SignalingError;
use async_trait::async_trait;
use tandem_core::{ConnectionId, ServerEvent};

/// Delivery seam between the signaling core and the transport: whatever
/// owns the client sockets implements this so rooms can reach a connection.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Send one event to one connection.
    async fn send_event(
        &self,
        connection_id: ConnectionId,
        event: ServerEvent,
    ) -> Result<(), SignalingError>;
}
