use crate::error::IceError;
use crate::ice::{IceServerProvider, fallback_ice_servers};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tandem_core::IceServerConfig;
use tracing::{info, warn};

pub const DEFAULT_ICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to ask for TURN credentials.
#[derive(Debug, Clone)]
pub struct IceServiceConfig {
    pub url: String,
    pub ident: String,
    pub secret: String,
    pub channel: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct CredentialRequest<'a> {
    format: &'static str,
    channel: &'a str,
}

/// Fetches ICE servers from a credential-issuing HTTPS service, falling
/// back to public STUN servers on any failure.
pub struct IceServerResolver {
    client: reqwest::Client,
    config: IceServiceConfig,
    fallback: Vec<IceServerConfig>,
}

impl IceServerResolver {
    pub fn new(config: IceServiceConfig) -> Result<Self, IceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            fallback: fallback_ice_servers(),
        })
    }

    /// One request to the credential service, without fallback.
    pub async fn fetch(&self) -> Result<Vec<IceServerConfig>, IceError> {
        let response = self
            .client
            .put(&self.config.url)
            .basic_auth(&self.config.ident, Some(&self.config.secret))
            .json(&CredentialRequest {
                format: "urls",
                channel: &self.config.channel,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IceError::Status(status));
        }

        let body: Value = response.json().await?;
        parse_ice_servers(body)
    }
}

/// Extracts `v.iceServers` from a credential service response.
fn parse_ice_servers(mut body: Value) -> Result<Vec<IceServerConfig>, IceError> {
    let list = body
        .get_mut("v")
        .and_then(|v| v.get_mut("iceServers"))
        .map(Value::take)
        .ok_or(IceError::MissingIceServers)?;

    let servers: Vec<IceServerConfig> = serde_json::from_value(list)?;
    if servers.is_empty() || servers.iter().any(|s| s.urls.is_empty()) {
        return Err(IceError::MissingIceServers);
    }
    Ok(servers)
}

#[async_trait]
impl IceServerProvider for IceServerResolver {
    async fn resolve(&self) -> Vec<IceServerConfig> {
        match self.fetch().await {
            Ok(servers) => {
                info!("Retrieved {} ICE servers from credential service", servers.len());
                servers
            }
            Err(e) => {
                warn!("Falling back to public STUN servers: {}", e);
                self.fallback.clone()
            }
        }
    }
}
