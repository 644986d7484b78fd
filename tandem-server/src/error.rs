use tandem_core::ConnectionId;
use thiserror::Error;

/// Failures delivering an event to a connection.
#[derive(Error, Debug)]
pub enum SignalingError {
    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),

    #[error("Outbound channel closed for connection {0}")]
    ChannelClosed(ConnectionId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures talking to the ICE credential service. Never surfaced to
/// clients: the resolver falls back to public STUN servers instead.
#[derive(Error, Debug)]
pub enum IceError {
    #[error("Credential service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Credential service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Credential service response has no ICE server list")]
    MissingIceServers,

    #[error("Malformed ICE server list: {0}")]
    Malformed(#[from] serde_json::Error),
}
