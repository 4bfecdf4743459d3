//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use burgerclick_server::{ServerConfig, ui::{build_app, state::AppState}};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        Message,
        client::IntoClientRequest,
        http::{HeaderValue, header::ORIGIN},
    },
};

pub type TestSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A server bound to an ephemeral port with its own scores file.
pub struct TestServer {
    addr: std::net::SocketAddr,
    data_dir: tempfile::TempDir,
    pub state: Arc<AppState>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_args(&[]).await
    }

    pub async fn start_with_args(extra: &[&str]) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_file = data_dir.path().join("clicks.json");
        let data_file = data_file.to_str().expect("temp path is not UTF-8").to_string();

        let mut args = vec!["burgerclick-server", "--data-file", data_file.as_str()];
        args.extend_from_slice(extra);
        let config = ServerConfig::try_parse_from(args).expect("Invalid test config");

        let state = Arc::new(AppState::new(&config));
        let app = build_app(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            data_dir,
            state,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn data_file(&self) -> std::path::PathBuf {
        self.data_dir.path().join("clicks.json")
    }

    pub async fn connect(&self) -> TestSocket {
        let (socket, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        socket
    }

    pub async fn connect_with_origin(&self, origin: &'static str) -> TestSocket {
        let mut request = self
            .ws_url()
            .into_client_request()
            .expect("Invalid WebSocket request");
        request
            .headers_mut()
            .insert(ORIGIN, HeaderValue::from_static(origin));
        let (socket, _) = connect_async(request)
            .await
            .expect("Failed to connect WebSocket");
        socket
    }

    /// Connect and consume the initial `scores` message.
    pub async fn connect_synced(&self) -> (TestSocket, Value) {
        let mut socket = self.connect().await;
        let initial = recv_json(&mut socket).await;
        assert_eq!(initial["type"], "scores");
        (socket, initial)
    }
}

pub async fn send_text(socket: &mut TestSocket, text: &str) {
    socket
        .send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send");
}

pub async fn send_click(socket: &mut TestSocket, name: &str) {
    let payload = serde_json::json!({"type": "click", "name": name}).to_string();
    send_text(socket, &payload).await;
}

/// Next message, or `None` if nothing arrives within `wait`.
pub async fn recv_within(socket: &mut TestSocket, wait: Duration) -> Option<Message> {
    match tokio::time::timeout(wait, socket.next()).await {
        Ok(Some(Ok(msg))) => Some(msg),
        _ => None,
    }
}

/// Next text message as JSON, failing the test after 2 seconds.
pub async fn recv_json(socket: &mut TestSocket) -> Value {
    loop {
        let msg = recv_within(socket, Duration::from_secs(2))
            .await
            .expect("Timed out waiting for a message");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Server sent invalid JSON");
        }
    }
}

/// Assert that no text message arrives within a short window.
pub async fn assert_silent(socket: &mut TestSocket) {
    if let Some(Message::Text(text)) = recv_within(socket, Duration::from_millis(300)).await {
        panic!("Unexpected message: {}", text.as_str());
    }
}
