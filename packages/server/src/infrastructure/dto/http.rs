//! HTTP API response DTOs for the click counter game.

use serde::{Deserialize, Serialize};

/// Plain `{"status": "..."}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Body of `POST /reset` on success
pub const RESET_STATUS: &str = "scores reset";
