use tandem_core::ConnectionId;

/// Members of a live room. An empty room is not represented: it is simply
/// absent from the room table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    One(ConnectionId),
    /// Members in join order.
    Two(ConnectionId, ConnectionId),
}

impl Occupancy {
    pub fn members(&self) -> Vec<ConnectionId> {
        match *self {
            Occupancy::One(a) => vec![a],
            Occupancy::Two(a, b) => vec![a, b],
        }
    }

    /// The other occupant, if `connection_id` shares the room with one.
    pub fn peer_of(&self, connection_id: &ConnectionId) -> Option<ConnectionId> {
        match *self {
            Occupancy::Two(a, b) if a == *connection_id => Some(b),
            Occupancy::Two(a, b) if b == *connection_id => Some(a),
            _ => None,
        }
    }

    /// Occupancy after `connection_id` leaves; `None` means the room is
    /// now empty and must be dropped.
    pub fn without(self, connection_id: &ConnectionId) -> Option<Occupancy> {
        match self {
            Occupancy::One(a) if a == *connection_id => None,
            Occupancy::Two(a, b) if a == *connection_id => Some(Occupancy::One(b)),
            Occupancy::Two(a, b) if b == *connection_id => Some(Occupancy::One(a)),
            unchanged => Some(unchanged),
        }
    }
}
