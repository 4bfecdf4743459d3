//! Domain layer for the click counter game.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod repository;
pub mod value_object;

pub use entity::ScoreBoard;
pub use error::{RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use metrics::{GameMetrics, NoopMetrics};
pub use repository::{BroadcastReport, ConnectionRepository, OutboundSender, ScoreRepository};
pub use value_object::{ConnectionId, PLAYER_NAME_MAX_CHARS, PlayerName, Timestamp};

#[cfg(test)]
pub use repository::{MockConnectionRepository, MockScoreRepository};
