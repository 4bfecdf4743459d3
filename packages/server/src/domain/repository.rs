//! Repository traits（ドメイン層が定義するデータアクセスの抽象）
//!
//! UseCase 層はこれらの trait にのみ依存し、具体的な実装
//! （ファイル / インメモリ）は infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, RepositoryError, ScoreBoard, Timestamp};

/// Outbound queue feeding one connection's socket writer.
pub type OutboundSender = mpsc::Sender<String>;

/// Durable storage of the scoreboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Read the persisted scoreboard.
    ///
    /// Never fails: a missing, empty, unparseable or schema-violating
    /// document yields an empty board. This is lossy by design of the
    /// storage format and callers must not rely on it to detect corruption.
    async fn load(&self) -> ScoreBoard;

    /// Replace the persisted scoreboard with `board` in full.
    async fn save(&self, board: &ScoreBoard) -> Result<(), RepositoryError>;
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections whose queue accepted the message
    pub delivered: usize,
    /// Connections removed because their queue was closed or full
    pub pruned: usize,
}

/// Registry of live realtime connections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Register a connection. Re-registering an id replaces its sender.
    async fn add_connection(
        &self,
        connection_id: ConnectionId,
        sender: OutboundSender,
        connected_at: Timestamp,
    );

    /// Remove a connection. Returns `false` when it was not registered.
    async fn remove_connection(&self, connection_id: &ConnectionId) -> bool;

    /// Queue `message` for a single connection, removing it on failure.
    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        message: String,
    ) -> Result<(), RepositoryError>;

    /// Queue `message` for every live connection, removing the ones that fail.
    async fn broadcast(&self, message: String) -> BroadcastReport;

    /// When the connection was registered, if it still is.
    async fn connected_at(&self, connection_id: &ConnectionId) -> Option<Timestamp>;

    async fn count_connections(&self) -> usize;
}
