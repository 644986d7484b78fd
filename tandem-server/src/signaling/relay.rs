use crate::room::{PeerLookup, RoomManager};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ConnectionId, RoomName, Signal};
use tracing::{debug, error};

/// What happened to a relayed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered(ConnectionId),
    /// Sender is alone in the room; the signal is dropped, not queued.
    NoPeer,
    /// Sender is not a member of the named room.
    NotMember,
    /// The peer's connection went away mid-delivery.
    Failed(ConnectionId),
}

/// Forwards signals from one occupant of a room to the other.
#[derive(Clone)]
pub struct SignalingRelay {
    rooms: RoomManager,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRelay {
    pub fn new(rooms: RoomManager, output: Arc<dyn SignalingOutput>) -> Self {
        Self { rooms, output }
    }

    pub async fn relay(
        &self,
        from: ConnectionId,
        room: &RoomName,
        signal: Signal,
    ) -> RelayOutcome {
        let kind = signal.kind();

        let peer = match self.rooms.lookup_peer(&from, room) {
            PeerLookup::Peer(peer) => peer,
            PeerLookup::Alone => {
                debug!("Dropping {} from {}: no peer in room {}", kind, from, room);
                return RelayOutcome::NoPeer;
            }
            PeerLookup::NotMember => {
                debug!("Dropping {} from {}: not a member of room {}", kind, from, room);
                return RelayOutcome::NotMember;
            }
        };

        match self.output.send_event(peer, signal.into()).await {
            Ok(()) => {
                debug!("Relayed {} in room {}: {} -> {}", kind, room, from, peer);
                RelayOutcome::Delivered(peer)
            }
            Err(e) => {
                error!("Failed to relay {} to {}: {}", kind, peer, e);
                RelayOutcome::Failed(peer)
            }
        }
    }
}
