//! UseCase: クライアント切断処理
//!
//! 切断は冪等です。ブロードキャスト中に既に除外された接続を
//! 再度削除しても何も起こりません。

use std::sync::Arc;

use burgerclick_shared::time::get_jst_timestamp;

use crate::domain::{ConnectionId, ConnectionRepository};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    connections: Arc<dyn ConnectionRepository>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    /// 接続をレジストリから削除する
    ///
    /// # Returns
    ///
    /// 実際に削除した場合は `true`、既に登録されていなかった場合は `false`
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        let connected_at = self.connections.connected_at(connection_id).await;
        let removed = self.connections.remove_connection(connection_id).await;

        if let Some(connected_at) = connected_at {
            tracing::info!(
                "Connection '{}' closed after {} ms",
                connection_id,
                get_jst_timestamp() - connected_at.value()
            );
        }
        removed
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.connections.count_connections().await
    }
}
