//! Router construction and the server main loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, error::ServerError};

use super::{handler, signal::shutdown_signal, state::AppState};

/// Build the axum application around `state`.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(handler::websocket_handler))
        .route("/scores", get(handler::get_scores))
        .route("/reset", post(handler::reset_scores))
        .route("/api/health", get(handler::health_check))
        .route("/metrics", get(handler::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(&config));
    let addr = config.bind_address();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        "burgerclick server listening on {} (scores file: {})",
        addr,
        config.data_file.display()
    );
    if config.allowed_origins.is_empty() {
        tracing::info!("No allowed origins configured; only loopback and non-browser clients may connect");
    }

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
