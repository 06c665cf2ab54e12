//! WebSocket streaming endpoint.
//!
//! `/ws` upgrades the connection and hands it to the streaming session:
//! the client sends one JSON message naming an agent and a query, and
//! receives `thinking`, word-by-word `chunk` events and `done` (or a single
//! `error`). The server closes the socket when the session ends.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;

use agentcast_core::session::SessionTransport;
use agentcast_types::error::TransportError;
use agentcast_types::session::OutboundEvent;

use crate::state::AppState;

/// Upgrade an HTTP request to a streaming session.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let mut transport = WsTransport::new(socket);
        state.session.run(&mut transport).await;
    })
}

/// [`SessionTransport`] over an axum WebSocket.
pub struct WsTransport {
    socket: WebSocket,
    closed: bool,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self {
            socket,
            closed: false,
        }
    }
}

impl SessionTransport for WsTransport {
    async fn recv_text(&mut self) -> Result<Option<String>, TransportError> {
        while !self.closed {
            match self.socket.recv().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                Some(Ok(Message::Close(_))) | None => self.closed = true,
                Some(Err(err)) => {
                    tracing::debug!("WebSocket receive error: {err}");
                    self.closed = true;
                    return Err(TransportError::Disconnected);
                }
                // Binary, ping and pong frames are not part of the protocol
                Some(Ok(_)) => {}
            }
        }
        Ok(None)
    }

    async fn send_event(&mut self, event: &OutboundEvent) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Disconnected);
        }
        let json = serde_json::to_string(event).map_err(|e| TransportError::Other(e.to_string()))?;
        self.socket
            .send(Message::Text(json.into()))
            .await
            .map_err(|_| {
                self.closed = true;
                TransportError::Disconnected
            })
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.socket
            .send(Message::Close(None))
            .await
            .map_err(|e| TransportError::Other(e.to_string()))
    }
}
