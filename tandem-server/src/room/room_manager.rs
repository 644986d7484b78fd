use crate::room::Occupancy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tandem_core::{ConnectionId, JoinOutcome, RoomName};
use tracing::{debug, info};

#[derive(Default)]
struct RoomTable {
    rooms: HashMap<RoomName, Occupancy>,
    memberships: HashMap<ConnectionId, RoomName>,
}

impl RoomTable {
    fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<RoomName> {
        let room = self.memberships.remove(connection_id)?;

        if let Entry::Occupied(mut entry) = self.rooms.entry(room.clone()) {
            match entry.get().without(connection_id) {
                Some(rest) => {
                    entry.insert(rest);
                }
                None => {
                    entry.remove();
                    debug!("Room {} is empty, dropping it", room);
                }
            }
        }

        Some(room)
    }

    fn peer_of(&self, connection_id: &ConnectionId) -> Option<ConnectionId> {
        let room = self.memberships.get(connection_id)?;
        self.rooms.get(room)?.peer_of(connection_id)
    }
}

/// A sender's position relative to the room it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerLookup {
    NotMember,
    Alone,
    Peer(ConnectionId),
}

/// Capacity-two room membership.
///
/// Both tables sit behind one lock, so `join`, `leave` and the peer lookups
/// are linearizable across all rooms. Nothing here performs I/O while the
/// lock is held.
#[derive(Clone, Default)]
pub struct RoomManager {
    table: Arc<Mutex<RoomTable>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the capacity rule: the first joiner creates the room, the
    /// second joins it, anyone else is told it is full and is not added.
    ///
    /// A connection belongs to at most one room, so a successful join of
    /// another room leaves the current one. A `Full` answer changes nothing,
    /// including for the room the caller already occupies.
    pub fn join(&self, connection_id: ConnectionId, room: &RoomName) -> JoinOutcome {
        let mut table = self.table.lock();
        let current = table.memberships.get(&connection_id).cloned();

        if current.as_ref() == Some(room) {
            debug!("{} is already in room {}", connection_id, room);
            return JoinOutcome::Full;
        }

        let (next, outcome) = match table.rooms.get(room).copied() {
            None => (Occupancy::One(connection_id), JoinOutcome::Created),
            Some(Occupancy::One(first)) => {
                (Occupancy::Two(first, connection_id), JoinOutcome::Joined)
            }
            Some(Occupancy::Two(..)) => return JoinOutcome::Full,
        };

        if let Some(previous) = table.remove_member(&connection_id) {
            info!("{} left room {} to join {}", connection_id, previous, room);
        }

        table.rooms.insert(room.clone(), next);
        table.memberships.insert(connection_id, room.clone());

        outcome
    }

    /// Removes the connection from its room, dropping the room once empty.
    /// Returns the room it left, or `None` if it was in no room.
    pub fn leave(&self, connection_id: &ConnectionId) -> Option<RoomName> {
        self.table.lock().remove_member(connection_id)
    }

    /// The other occupant of the caller's room.
    pub fn peer_of(&self, connection_id: &ConnectionId) -> Option<ConnectionId> {
        self.table.lock().peer_of(connection_id)
    }

    /// Where `connection_id` stands in `room`, read under a single lock.
    pub fn lookup_peer(&self, connection_id: &ConnectionId, room: &RoomName) -> PeerLookup {
        let table = self.table.lock();
        if table.memberships.get(connection_id) != Some(room) {
            return PeerLookup::NotMember;
        }

        match table.peer_of(connection_id) {
            Some(peer) => PeerLookup::Peer(peer),
            None => PeerLookup::Alone,
        }
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomName> {
        self.table.lock().memberships.get(connection_id).cloned()
    }

    /// Current members of `room` in join order; empty when the room is absent.
    pub fn occupants(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.table
            .lock()
            .rooms
            .get(room)
            .map(Occupancy::members)
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.table.lock().rooms.len()
    }
}
