use async_trait::async_trait;
use tandem_core::IceServerConfig;

/// Public STUN servers handed out whenever no credential service answers.
pub const FALLBACK_STUN_URLS: [&str; 5] = [
    "stun:stun.l.google.com:19302",
    "stun:stun1.l.google.com:19302",
    "stun:stun2.l.google.com:19302",
    "stun:stun3.l.google.com:19302",
    "stun:stun4.l.google.com:19302",
];

pub fn fallback_ice_servers() -> Vec<IceServerConfig> {
    FALLBACK_STUN_URLS
        .iter()
        .map(|url| IceServerConfig::stun(*url))
        .collect()
}

/// Source of the ICE server list pushed to every new connection.
///
/// `resolve` cannot fail: implementations recover internally and always
/// return a usable, non-empty list.
#[async_trait]
pub trait IceServerProvider: Send + Sync {
    async fn resolve(&self) -> Vec<IceServerConfig>;
}

/// A fixed list, used when no credential service is configured.
#[derive(Debug, Clone)]
pub struct StaticIceServers {
    servers: Vec<IceServerConfig>,
}

impl StaticIceServers {
    pub fn new(servers: Vec<IceServerConfig>) -> Self {
        if servers.is_empty() {
            return Self::default();
        }
        Self { servers }
    }
}

impl Default for StaticIceServers {
    fn default() -> Self {
        Self {
            servers: fallback_ice_servers(),
        }
    }
}

#[async_trait]
impl IceServerProvider for StaticIceServers {
    async fn resolve(&self) -> Vec<IceServerConfig> {
        self.servers.clone()
    }
}
