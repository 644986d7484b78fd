//! WebRTC signaling relay for rooms of exactly two peers.
//!
//! Clients connect over a WebSocket, receive an ICE server list, join a
//! named room and exchange `ready`/`offer`/`answer`/`candidate` events with
//! the other occupant. Payloads are forwarded untouched; media never flows
//! through the relay.

pub mod config;
pub mod error;
mod ice;
mod room;
mod router;
mod session;
mod signaling;

pub use config::{LogLevel, ServerConfig};
pub use error::{IceError, SignalingError};
pub use ice::*;
pub use room::*;
pub use router::*;
pub use session::*;
pub use signaling::*;
