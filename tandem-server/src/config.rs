use crate::error::IceError;
use crate::ice::{
    DEFAULT_ICE_TIMEOUT, IceServerProvider, IceServerResolver, IceServiceConfig, StaticIceServers,
};
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Default `EnvFilter` directives for this level.
    pub fn filter(self) -> &'static str {
        match self {
            LogLevel::Error => "tandem_server=error,tower_http=error",
            LogLevel::Warn => "tandem_server=warn,tower_http=warn",
            LogLevel::Info => "tandem_server=info,tower_http=info",
            LogLevel::Debug => "tandem_server=debug,tower_http=debug",
            LogLevel::Trace => "tandem_server=trace,tower_http=debug",
        }
    }
}

/// Tandem signaling server command line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "tandem-server", version, about = "WebRTC signaling relay for two-peer rooms")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "TANDEM_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short = 'p', long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Directory served as static files
    #[arg(long, env = "TANDEM_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// ICE credential service endpoint
    #[arg(long, env = "TANDEM_ICE_URL", default_value = "https://global.xirsys.net/ice")]
    pub ice_service_url: String,

    /// Basic-auth identity for the ICE credential service
    #[arg(long, env = "TANDEM_ICE_IDENT")]
    pub ice_ident: Option<String>,

    /// Basic-auth secret for the ICE credential service
    #[arg(long, env = "TANDEM_ICE_SECRET", hide_env_values = true)]
    pub ice_secret: Option<String>,

    /// Channel requested from the ICE credential service
    #[arg(long, env = "TANDEM_ICE_CHANNEL", default_value = "default")]
    pub ice_channel: String,

    /// Credential service timeout in milliseconds
    #[arg(
        long,
        env = "TANDEM_ICE_TIMEOUT_MS",
        default_value_t = DEFAULT_ICE_TIMEOUT.as_millis() as u64
    )]
    pub ice_timeout_ms: u64,

    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn effective_log_level(&self) -> LogLevel {
        match self.verbose {
            0 => self.log_level,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Credential service settings, present only when both identity and
    /// secret are configured.
    pub fn ice_service(&self) -> Option<IceServiceConfig> {
        let ident = self.ice_ident.clone().filter(|s| !s.is_empty())?;
        let secret = self.ice_secret.clone().filter(|s| !s.is_empty())?;

        Some(IceServiceConfig {
            url: self.ice_service_url.clone(),
            ident,
            secret,
            channel: self.ice_channel.clone(),
            timeout: Duration::from_millis(self.ice_timeout_ms),
        })
    }

    pub fn ice_provider(&self) -> Result<Arc<dyn IceServerProvider>, IceError> {
        match self.ice_service() {
            Some(service) => {
                info!("Using ICE credential service at {}", service.url);
                Ok(Arc::new(IceServerResolver::new(service)?))
            }
            None => {
                info!("No ICE credentials configured, serving public STUN servers only");
                Ok(Arc::new(StaticIceServers::default()))
            }
        }
    }
}
