use crate::session::SessionLifecycle;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tandem_core::{ConnectionId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{debug, error};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(session): State<SessionLifecycle>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, session))
}

async fn handle_socket(socket: WebSocket, session: SessionLifecycle) {
    let connection_id = ConnectionId::new();

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let _ice_task = session.on_open(connection_id, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize event for {}: {}", connection_id, e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let session = session.clone();

        async move {
            while let Some(msg) = receiver.next().await {
                match msg {
                    Ok(Message::Text(text)) => session.on_text(connection_id, text.as_str()).await,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        debug!("WebSocket error on {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    session.on_close(connection_id);
}
