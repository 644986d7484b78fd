use crate::model::room::RoomName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `urls` of an ICE server: browsers accept a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IceUrls {
    One(String),
    Many(Vec<String>),
}

impl IceUrls {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let urls: &[String] = match self {
            IceUrls::One(url) => std::slice::from_ref(url),
            IceUrls::Many(urls) => urls,
        };
        urls.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: IceUrls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    /// A credential-less server, e.g. a public STUN endpoint.
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: IceUrls::One(url.into()),
            username: None,
            credential: None,
        }
    }
}

/// Events a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "camelCase")]
pub enum ClientEvent {
    Join { room: RoomName },
    Ready { room: RoomName },
    Offer { payload: Value, room: RoomName },
    Answer { payload: Value, room: RoomName },
    Candidate { payload: Value, room: RoomName },
}

impl ClientEvent {
    /// Splits a relayable event into its target room and the signal to
    /// forward. `Join` is not relayable; its room is handed back instead.
    pub fn into_signal(self) -> Result<(RoomName, Signal), RoomName> {
        match self {
            ClientEvent::Ready { room } => Ok((room, Signal::Ready)),
            ClientEvent::Offer { payload, room } => Ok((room, Signal::Offer(payload))),
            ClientEvent::Answer { payload, room } => Ok((room, Signal::Answer(payload))),
            ClientEvent::Candidate { payload, room } => Ok((room, Signal::Candidate(payload))),
            ClientEvent::Join { room } => Err(room),
        }
    }

    pub fn room(&self) -> &RoomName {
        match self {
            ClientEvent::Join { room }
            | ClientEvent::Ready { room }
            | ClientEvent::Offer { room, .. }
            | ClientEvent::Answer { room, .. }
            | ClientEvent::Candidate { room, .. } => room,
        }
    }
}

/// The closed set of messages relayed between the two occupants of a room.
/// Payloads are opaque and forwarded untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Ready,
    Offer(Value),
    Answer(Value),
    Candidate(Value),
}

impl Signal {
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Ready => "ready",
            Signal::Offer(_) => "offer",
            Signal::Answer(_) => "answer",
            Signal::Candidate(_) => "candidate",
        }
    }
}

/// Result of asking to join a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Created,
    Joined,
    Full,
}

/// Events the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "camelCase")]
pub enum ServerEvent {
    IceServers {
        #[serde(rename = "iceServers")]
        ice_servers: Vec<IceServerConfig>,
    },
    Created,
    Joined,
    Full,
    Ready,
    Offer(Value),
    Answer(Value),
    Candidate(Value),
}

impl From<JoinOutcome> for ServerEvent {
    fn from(outcome: JoinOutcome) -> Self {
        match outcome {
            JoinOutcome::Created => ServerEvent::Created,
            JoinOutcome::Joined => ServerEvent::Joined,
            JoinOutcome::Full => ServerEvent::Full,
        }
    }
}

impl From<Signal> for ServerEvent {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Ready => ServerEvent::Ready,
            Signal::Offer(payload) => ServerEvent::Offer(payload),
            Signal::Answer(payload) => ServerEvent::Answer(payload),
            Signal::Candidate(payload) => ServerEvent::Candidate(payload),
        }
    }
}
