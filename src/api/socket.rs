//! Realtime chat channel over WebSocket.
//!
//! Inbound frames: `{"message": "..."}`. Outbound frames:
//! `{"message": "...", "sender": "bot"}`, sent back on the same connection.

use super::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Message sent by the browser.
#[derive(Debug, Deserialize)]
pub(super) struct ClientEvent {
    pub message: String,
}

/// Reply pushed to the browser.
#[derive(Debug, Serialize)]
pub(super) struct ServerEvent {
    pub message: String,
    pub sender: &'static str,
}

impl ServerEvent {
    fn bot(message: String) -> Self {
        Self {
            message,
            sender: "bot",
        }
    }
}

/// Parse an inbound text frame; `None` for anything that is not a chat message.
pub(super) fn parse_client_event(frame: &str) -> Option<ClientEvent> {
    serde_json::from_str(frame).ok()
}

/// `GET /socket`: upgrade and bind the connection to the session's user.
pub(super) async fn upgrade(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Response {
    let user_id = state.sessions.resolve_user(&headers);
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

async fn handle_socket(mut socket: WebSocket, state: AppState, user_id: String) {
    info!("socket: connection opened for {user_id}");

    while let Some(frame) = socket.recv().await {
        let frame = match frame {
            Ok(f) => f,
            Err(e) => {
                warn!("socket: receive error for {user_id}: {e}");
                break;
            }
        };

        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let Some(event) = parse_client_event(text.as_str()) else {
            warn!("socket: ignoring malformed frame from {user_id}");
            continue;
        };

        let reply = state.gateway.respond(&user_id, &event.message).await;
        let payload = match serde_json::to_string(&ServerEvent::bot(reply)) {
            Ok(p) => p,
            Err(e) => {
                warn!("socket: failed to encode reply: {e}");
                continue;
            }
        };

        if socket.send(Message::Text(payload.into())).await.is_err() {
            debug!("socket: peer went away before reply for {user_id}");
            break;
        }
    }

    info!("socket: connection closed for {user_id}");
}
