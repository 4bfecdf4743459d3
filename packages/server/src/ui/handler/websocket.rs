//! WebSocket connection handlers.
//!
//! Each session moves through connecting → admitted → active → closed:
//! the origin check runs before registration, the initial scoreboard is
//! queued during registration, and the session always unregisters itself
//! when either of its tasks ends.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::{HeaderMap, header::ORIGIN},
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::parse_inbound,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let origin = match headers.get(ORIGIN).map(|value| value.to_str()) {
        None => None,
        Some(Ok(origin)) => Some(origin.to_string()),
        Some(Err(_)) => Some(String::new()),
    };

    if !state.origin_policy.allows(origin.as_deref()) {
        tracing::warn!(
            "Rejecting WebSocket from disallowed origin {:?}",
            origin.unwrap_or_default()
        );
        return ws.on_upgrade(reject_socket);
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Close a freshly upgraded socket with a policy-violation frame.
async fn reject_socket(mut socket: WebSocket) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: "origin not allowed".into(),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send policy close frame: {}", e);
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Outbound queue drained by the writer task below
    let (tx, mut rx) = mpsc::channel::<String>(state.session.outbound_capacity);

    if let Err(e) = state.connect_client().execute(connection_id, tx).await {
        tracing::error!("Failed to admit connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' admitted", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let send_timeout = state.session.send_timeout;
    let writer_id = connection_id;
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(send_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("Send to '{}' failed: {}", writer_id, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Send to '{}' timed out after {:?}, closing",
                        writer_id,
                        send_timeout
                    );
                    break;
                }
            }
        }
    });

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&state_clone, &connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket protocol; binary frames are not part of it
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_client().execute(&connection_id).await;
}

async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match parse_inbound(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("Ignoring message from '{}': {}", connection_id, e);
            return;
        }
    };

    if let Err(e) = state.record_click().execute(event).await {
        tracing::error!("Click from '{}' was not recorded: {}", connection_id, e);
    }
}
