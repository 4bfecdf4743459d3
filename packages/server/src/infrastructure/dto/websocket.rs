//! WebSocket message DTOs for the click counter game.
//!
//! Every frame is a JSON object discriminated by its `type` field. Inbound
//! frames that are not a well-formed `click` are discarded without a reply;
//! unknown types are ignored so the protocol can grow.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{PlayerName, ScoreBoard, ValueObjectError};

/// `type` value of a click frame (both directions)
pub const CLICK_TYPE: &str = "click";

/// Messages sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Full scoreboard snapshot
    Scores { scores: ScoreBoard },
    /// A single click was counted
    Click { name: String, total: u64 },
}

/// A validated inbound click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub name: PlayerName,
}

/// Messages sent from clients to the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Click { name: String },
}

/// Why an inbound frame was discarded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("payload is not valid JSON")]
    Malformed,

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has no string `type` field")]
    MissingType,

    #[error("unsupported message type: {0}")]
    UnknownType(String),

    #[error("click has no string `name` field")]
    MissingName,

    #[error("invalid player name: {0}")]
    InvalidName(#[from] ValueObjectError),
}

/// Decode and validate one inbound text frame.
pub fn parse_inbound(raw: &str) -> Result<ClickEvent, ProtocolError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| ProtocolError::Malformed)?;
    let object = value.as_object().ok_or(ProtocolError::NotAnObject)?;

    let message_type = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingType)?;
    if message_type != CLICK_TYPE {
        return Err(ProtocolError::UnknownType(message_type.to_string()));
    }

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingName)?;

    Ok(ClickEvent {
        name: PlayerName::new(name.to_string())?,
    })
}

/// `{"type":"scores","scores":{...}}`
pub fn encode_scores(board: &ScoreBoard) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::Scores {
        scores: board.clone(),
    })
}

/// `{"type":"click","name":"...","total":N}`
pub fn encode_click(name: &PlayerName, total: u64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::Click {
        name: name.as_str().to_string(),
        total,
    })
}
