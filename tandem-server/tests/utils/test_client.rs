use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tandem_core::{ClientEvent, IceServerConfig, RoomName, ServerEvent};
use tandem_server::{
    ConnectionRegistry, IceServerProvider, RoomManager, SessionLifecycle, StaticIceServers,
    create_router,
};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single expected event (ms).
pub const EVENT_TIMEOUT_MS: u64 = 2000;

/// How long to wait before concluding that nothing else will arrive (ms).
pub const QUIET_PERIOD_MS: u64 = 300;

/// A running relay on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub session: SessionLifecycle,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(Arc::new(StaticIceServers::default())).await
    }

    pub async fn start_with(ice: Arc<dyn IceServerProvider>) -> Result<Self> {
        let session = SessionLifecycle::new(ConnectionRegistry::new(), RoomManager::new(), ice);
        let app = create_router(session.clone(), "tests/does-not-exist");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, session })
    }

    pub async fn connect(&self) -> Result<TestClient> {
        TestClient::connect(self.addr).await
    }

    /// Polls until the room has exactly `expected` occupants.
    pub async fn wait_for_occupants(&self, room: &str, expected: usize) -> Result<()> {
        let room = RoomName::from(room);
        let start = std::time::Instant::now();

        while self.session.rooms().occupants(&room).len() != expected {
            if start.elapsed() > Duration::from_millis(EVENT_TIMEOUT_MS) {
                anyhow::bail!("Timeout waiting for {} occupants in {}", expected, room);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        Ok(())
    }
}

/// WebSocket signaling client speaking the relay's JSON protocol.
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// The list pushed by the server right after connecting.
    pub ice_servers: Vec<IceServerConfig>,
}

impl TestClient {
    /// Connects and waits for the initial `iceServers` event.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (stream, _) = connect_async(format!("ws://{}/ws", addr))
            .await
            .context("Failed to connect")?;

        let mut client = Self {
            stream,
            ice_servers: Vec::new(),
        };

        match client.recv().await? {
            ServerEvent::IceServers { ice_servers } => client.ice_servers = ice_servers,
            other => anyhow::bail!("Expected iceServers first, got {:?}", other),
        }

        Ok(client)
    }

    pub async fn send(&mut self, event: ClientEvent) -> Result<()> {
        let json = serde_json::to_string(&event)?;
        self.send_raw(json).await
    }

    pub async fn send_raw(&mut self, text: impl Into<String>) -> Result<()> {
        self.stream
            .send(Message::text(text.into()))
            .await
            .context("Failed to send frame")
    }

    pub async fn join(&mut self, room: &str) -> Result<ServerEvent> {
        self.send(ClientEvent::Join { room: room.into() }).await?;
        self.recv().await
    }

    pub async fn ready(&mut self, room: &str) -> Result<()> {
        self.send(ClientEvent::Ready { room: room.into() }).await
    }

    pub async fn offer(&mut self, room: &str, payload: Value) -> Result<()> {
        self.send(ClientEvent::Offer {
            payload,
            room: room.into(),
        })
        .await
    }

    pub async fn answer(&mut self, room: &str, payload: Value) -> Result<()> {
        self.send(ClientEvent::Answer {
            payload,
            room: room.into(),
        })
        .await
    }

    pub async fn candidate(&mut self, room: &str, payload: Value) -> Result<()> {
        self.send(ClientEvent::Candidate {
            payload,
            room: room.into(),
        })
        .await
    }

    /// Next server event, skipping control frames.
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), self.next_event())
            .await
            .context("Timeout waiting for event")?
    }

    /// Fails if any event arrives within the quiet period.
    pub async fn expect_silence(&mut self) -> Result<()> {
        match tokio::time::timeout(Duration::from_millis(QUIET_PERIOD_MS), self.next_event()).await
        {
            Err(_) => Ok(()),
            Ok(Ok(event)) => anyhow::bail!("Expected no event, got {:?}", event),
            Ok(Err(e)) => Err(e),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.context("Failed to close")?;
        Ok(())
    }

    async fn next_event(&mut self) -> Result<ServerEvent> {
        loop {
            let msg = self
                .stream
                .next()
                .await
                .context("Connection closed")?
                .context("WebSocket error")?;

            match msg {
                Message::Text(text) => {
                    return serde_json::from_str(text.as_str()).context("Unexpected event");
                }
                Message::Close(_) => anyhow::bail!("Server closed the connection"),
                _ => continue,
            }
        }
    }
}
