//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! HashMap を接続レジストリとして使用します。
//!
//! 全ての変更とブロードキャストは同じ Mutex の内側で行われるため、
//! ブロードキャスト中の削除がイテレーションを壊すことはありません。
//! 送信はキューへの `try_send` のみで、ソケットへの書き込みは各接続の
//! writer タスクが行います。キューが閉じている・満杯の接続はその場で除外します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionRepository, GameMetrics, OutboundSender,
    RepositoryError, Timestamp,
};

/// Connection registry entry
pub struct ConnectionInfo {
    /// Outbound queue of the connection
    pub sender: OutboundSender,
    /// Unix timestamp when connected (in JST, milliseconds)
    pub connected_at: Timestamp,
}

/// インメモリ Connection Repository 実装
pub struct InMemoryConnectionRepository {
    /// 接続中のクライアント
    connections: Mutex<HashMap<ConnectionId, ConnectionInfo>>,
    /// 接続数ゲージの更新先
    metrics: Arc<dyn GameMetrics>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new(metrics: Arc<dyn GameMetrics>) -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            metrics,
        }
    }
}

fn describe(err: &TrySendError<String>) -> &'static str {
    match err {
        TrySendError::Full(_) => "outbound queue full",
        TrySendError::Closed(_) => "connection closed",
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add_connection(
        &self,
        connection_id: ConnectionId,
        sender: OutboundSender,
        connected_at: Timestamp,
    ) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            connection_id,
            ConnectionInfo {
                sender,
                connected_at,
            },
        );
        self.metrics.set_active_connections(connections.len());
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(connection_id).is_some();
        if removed {
            self.metrics.set_active_connections(connections.len());
        }
        removed
    }

    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        message: String,
    ) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        let info = connections
            .get(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;

        if let Err(e) = info.sender.try_send(message) {
            tracing::warn!(
                "Dropping connection '{}': {}",
                connection_id,
                describe(&e)
            );
            connections.remove(connection_id);
            self.metrics.set_active_connections(connections.len());
            return Err(RepositoryError::ConnectionUnavailable(
                connection_id.to_string(),
            ));
        }
        Ok(())
    }

    async fn broadcast(&self, message: String) -> BroadcastReport {
        let mut connections = self.connections.lock().await;
        let before = connections.len();

        connections.retain(|id, info| match info.sender.try_send(message.clone()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping connection '{}': {}", id, describe(&e));
                false
            }
        });

        let report = BroadcastReport {
            delivered: connections.len(),
            pruned: before - connections.len(),
        };
        if report.pruned > 0 {
            self.metrics.set_active_connections(connections.len());
        }
        report
    }

    async fn connected_at(&self, connection_id: &ConnectionId) -> Option<Timestamp> {
        let connections = self.connections.lock().await;
        connections.get(connection_id).map(|info| info.connected_at)
    }

    async fn count_connections(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
