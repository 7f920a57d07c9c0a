use crate::{
    websocket::{
        messages::{ClientMessage, ServerMessage},
        session::{run_session, SessionContext},
    },
    AppState, SessionInfo,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::{sync::Arc, time::Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Outbound queue per connection
const OUTBOUND_BUFFER: usize = 100;
/// Player actions waiting for the session task
const ACTION_BUFFER: usize = 32;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one connection: a reader, a writer and the game session between them
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(OUTBOUND_BUFFER);
    let (action_tx, action_rx) = mpsc::channel::<ClientMessage>(ACTION_BUFFER);

    state.sessions.insert(
        session_id,
        SessionInfo {
            connected_at: Instant::now(),
        },
    );
    tracing::info!("Session {} connected", session_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let error_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(action) => {
                        if action_tx.send(action).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = error_tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Session {} closed by client", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let ctx = SessionContext {
        game: state.config.game.clone(),
        validator: state.validator.clone(),
    };
    let mut session_task = tokio::spawn(run_session(ctx, action_rx, tx));

    // Wait for any task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            session_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
            session_task.abort();
        }
        _ = (&mut session_task) => {
            recv_task.abort();
            send_task.abort();
        }
    }

    state.sessions.remove(&session_id);

    tracing::info!("Session {} disconnected", session_id);
}
