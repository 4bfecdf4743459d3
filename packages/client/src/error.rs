//! Client error definitions.

use burgerclick_server::domain::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid player name: {0}")]
    InvalidName(#[from] ValueObjectError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("failed to start line editor: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
