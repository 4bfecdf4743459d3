//! UseCase: スコアリセット
//!
//! スコアボードを空で上書きし、全接続に空の `scores` を送って再同期させます。
//! アクセス制御はありません（テスト・管理用）。

use std::sync::Arc;

use crate::{
    domain::{ConnectionRepository, GameMetrics, ScoreBoard, ScoreRepository},
    infrastructure::dto::websocket::encode_scores,
};

use super::{ScoreWriteLock, error::ResetError};

/// スコアリセットのユースケース
#[derive(Clone)]
pub struct ResetScoresUseCase {
    scores: Arc<dyn ScoreRepository>,
    connections: Arc<dyn ConnectionRepository>,
    metrics: Arc<dyn GameMetrics>,
    write_lock: ScoreWriteLock,
}

impl ResetScoresUseCase {
    /// 新しい ResetScoresUseCase を作成
    pub fn new(
        scores: Arc<dyn ScoreRepository>,
        connections: Arc<dyn ConnectionRepository>,
        metrics: Arc<dyn GameMetrics>,
        write_lock: ScoreWriteLock,
    ) -> Self {
        Self {
            scores,
            connections,
            metrics,
            write_lock,
        }
    }

    /// スコアボードを空にする
    ///
    /// # Returns
    ///
    /// 空のスコアボードを受け取った接続数
    pub async fn execute(&self) -> Result<usize, ResetError> {
        let usecase = self.clone();
        tokio::spawn(async move { usecase.reset().await }).await?
    }

    async fn reset(&self) -> Result<usize, ResetError> {
        let _guard = self.write_lock.lock().await;

        let board = ScoreBoard::new();
        let snapshot = encode_scores(&board)?;
        self.scores.save(&board).await?;
        self.metrics.record_reset();

        let report = self.connections.broadcast(snapshot).await;
        tracing::info!(
            "Scores reset, {} connection(s) resynced",
            report.delivered
        );
        Ok(report.delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, PlayerName, Timestamp},
        infrastructure::{
            metrics::PrometheusMetrics,
            repository::{FileScoreRepository, InMemoryConnectionRepository},
        },
        usecase::{GetScoresUseCase, new_score_write_lock},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_reset_clears_any_prior_state() {
        // テスト項目: どんな状態からでもリセット後は空になる（冪等）
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clicks.json");
        let scores = Arc::new(FileScoreRepository::new(&path));
        let metrics = Arc::new(PrometheusMetrics::new());
        let connections = Arc::new(InMemoryConnectionRepository::new(metrics.clone()));
        let usecase = ResetScoresUseCase::new(
            scores.clone(),
            connections,
            metrics.clone(),
            new_score_write_lock(),
        );

        let mut board = ScoreBoard::new();
        board.increment(&PlayerName::new("alice".to_string()).unwrap());
        let prior_states = [
            serde_json::to_string(&board).unwrap(),
            "{corrupt".to_string(),
            String::new(),
        ];

        for prior in prior_states {
            std::fs::write(&path, prior).unwrap();

            // when (操作):
            usecase.execute().await.unwrap();

            // then (期待する結果):
            assert!(GetScoresUseCase::new(scores.clone()).execute().await.is_empty());
        }

        // ファイルが無い状態からのリセットも成功する
        std::fs::remove_file(&path).unwrap();
        usecase.execute().await.unwrap();
        assert!(scores.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_resyncs_connections() {
        // テスト項目: リセット後、全接続に空の scores が送られる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let scores = Arc::new(FileScoreRepository::new(dir.path().join("clicks.json")));
        let metrics = Arc::new(PrometheusMetrics::new());
        let connections = Arc::new(InMemoryConnectionRepository::new(metrics.clone()));
        let (tx, mut rx) = mpsc::channel(4);
        connections
            .add_connection(ConnectionIdFactory::generate(), tx, Timestamp::new(0))
            .await;
        metrics.record_click(&PlayerName::new("alice".to_string()).unwrap(), 3);

        let usecase =
            ResetScoresUseCase::new(scores, connections, metrics.clone(), new_score_write_lock());

        // when (操作):
        let delivered = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(
            rx.recv().await.as_deref(),
            Some(r#"{"type":"scores","scores":{}}"#)
        );
        assert_eq!(metrics.score("alice"), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reset_completes_when_caller_is_dropped() {
        // テスト項目: 呼び出し側の future が破棄されてもリセットは保存と再同期まで完了する
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clicks.json");
        std::fs::write(&path, r#"{"alice": 7}"#).unwrap();
        let scores = Arc::new(FileScoreRepository::new(&path));
        let metrics = Arc::new(PrometheusMetrics::new());
        let connections = Arc::new(InMemoryConnectionRepository::new(metrics.clone()));
        let (tx, mut rx) = mpsc::channel(4);
        connections
            .add_connection(ConnectionIdFactory::generate(), tx, Timestamp::new(0))
            .await;
        let write_lock = new_score_write_lock();
        let usecase =
            ResetScoresUseCase::new(scores.clone(), connections, metrics, write_lock.clone());

        // when (操作): ロック待ちの間に呼び出し側を破棄する
        let held = write_lock.lock().await;
        let handle = tokio::spawn(async move { usecase.execute().await });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        handle.abort();
        let _ = handle.await;
        drop(held);

        // then (期待する結果):
        assert_eq!(
            tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
                .await
                .unwrap()
                .as_deref(),
            Some(r#"{"type":"scores","scores":{}}"#)
        );
        assert!(scores.load().await.is_empty());
    }
}
