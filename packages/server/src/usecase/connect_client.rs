//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、現在のスコアボードによる初期同期
//!
//! ### なぜこのテストが必要か
//! - 新しい接続は、他のどのメッセージよりも先に現在のスコアボードを受け取る必要がある
//! - 初期同期に失敗した接続がレジストリに残ってはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：保存済みスコアボードでの初期同期
//! - 正常系：ファイルが無い場合は空のスコアボード
//! - 異常系：接続のキューが既に閉じている

use std::sync::Arc;

use burgerclick_shared::time::get_jst_timestamp;

use crate::{
    domain::{ConnectionId, ConnectionRepository, OutboundSender, ScoreRepository, Timestamp},
    infrastructure::dto::websocket::encode_scores,
};

use super::{ScoreWriteLock, error::ConnectError};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    scores: Arc<dyn ScoreRepository>,
    connections: Arc<dyn ConnectionRepository>,
    write_lock: ScoreWriteLock,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        scores: Arc<dyn ScoreRepository>,
        connections: Arc<dyn ConnectionRepository>,
        write_lock: ScoreWriteLock,
    ) -> Self {
        Self {
            scores,
            connections,
            write_lock,
        }
    }

    /// 接続を登録し、初期スコアボードを送信する
    ///
    /// 書き込みロックの内側で行うため、初期同期より前にクリックの
    /// ブロードキャストがこの接続に届くことはない。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録と初期同期に成功
    /// * `Err(ConnectError)` - 失敗（接続は登録されていない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: OutboundSender,
    ) -> Result<(), ConnectError> {
        let _guard = self.write_lock.lock().await;

        let board = self.scores.load().await;
        let snapshot = encode_scores(&board)?;

        self.connections
            .add_connection(connection_id, sender, Timestamp::new(get_jst_timestamp()))
            .await;
        // send_to removes the connection itself on failure
        self.connections.send_to(&connection_id, snapshot).await?;

        tracing::debug!(
            "Sent initial scoreboard ({} players) to '{}'",
            board.len(),
            connection_id
        );
        Ok(())
    }
}
