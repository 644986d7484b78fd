use crate::ice::IceServerProvider;
use crate::room::RoomManager;
use crate::signaling::{ConnectionRegistry, RelayOutcome, SignalingRelay};
use std::sync::Arc;
use tandem_core::{ClientEvent, ConnectionId, JoinOutcome, RoomName, ServerEvent, Signal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Per-connection entry points: open, inbound events, close.
///
/// Cheap to clone; every connection task holds its own handle.
#[derive(Clone)]
pub struct SessionLifecycle {
    registry: ConnectionRegistry,
    rooms: RoomManager,
    relay: SignalingRelay,
    ice: Arc<dyn IceServerProvider>,
}

impl SessionLifecycle {
    pub fn new(
        registry: ConnectionRegistry,
        rooms: RoomManager,
        ice: Arc<dyn IceServerProvider>,
    ) -> Self {
        let relay = SignalingRelay::new(rooms.clone(), Arc::new(registry.clone()));

        Self {
            registry,
            rooms,
            relay,
            ice,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    /// Registers the connection and resolves ICE servers for it in the
    /// background. The list is pushed as soon as it arrives, whether or not
    /// the client has joined a room; if the connection is gone by then the
    /// result is discarded.
    pub fn on_open(
        &self,
        connection_id: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> JoinHandle<()> {
        info!("User connected: {}", connection_id);
        self.registry.register(connection_id, tx);

        let registry = self.registry.clone();
        let ice = Arc::clone(&self.ice);

        tokio::spawn(async move {
            let ice_servers = ice.resolve().await;

            match registry.send(connection_id, ServerEvent::IceServers { ice_servers }) {
                Ok(()) => info!("ICE servers sent to client: {}", connection_id),
                Err(e) => debug!("Discarding ICE servers for {}: {}", connection_id, e),
            }
        })
    }

    /// Applies the room capacity rule and answers only the requester.
    pub fn on_join_request(&self, connection_id: ConnectionId, room: &RoomName) -> JoinOutcome {
        let outcome = self.rooms.join(connection_id, room);

        match outcome {
            JoinOutcome::Created => info!("Room {} created by {}", room, connection_id),
            JoinOutcome::Joined => info!("Client {} joined room {}", connection_id, room),
            JoinOutcome::Full => {
                info!("Room {} is full, client {} cannot join", room, connection_id)
            }
        }

        if let Err(e) = self.registry.send(connection_id, outcome.into()) {
            warn!("Could not answer join from {}: {}", connection_id, e);
        }

        outcome
    }

    pub async fn on_signal(
        &self,
        connection_id: ConnectionId,
        room: &RoomName,
        signal: Signal,
    ) -> RelayOutcome {
        self.relay.relay(connection_id, room, signal).await
    }

    /// Parses one inbound text frame and dispatches it. Malformed frames
    /// are logged and dropped; they never end the connection.
    pub async fn on_text(&self, connection_id: ConnectionId, text: &str) {
        let event = match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => event,
            Err(e) => {
                warn!("Invalid event from {}: {}", connection_id, e);
                return;
            }
        };

        if event.room().is_empty() {
            warn!("Event from {} names no room, dropping it", connection_id);
            return;
        }

        match event.into_signal() {
            Ok((room, signal)) => {
                self.on_signal(connection_id, &room, signal).await;
            }
            Err(room) => {
                self.on_join_request(connection_id, &room);
            }
        }
    }

    /// Leaves the room and forgets the connection. The former peer is not
    /// told; its next signal simply finds no peer.
    pub fn on_close(&self, connection_id: ConnectionId) {
        if let Some(room) = self.rooms.leave(&connection_id) {
            info!("Client {} left room {}", connection_id, room);
        }
        self.registry.unregister(&connection_id);
        info!("User disconnected: {}", connection_id);
    }
}
