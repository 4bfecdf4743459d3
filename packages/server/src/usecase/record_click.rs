//! UseCase: クリック処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RecordClickUseCase::execute() メソッド
//! - 読み込み → 加算 → 保存 → `click` と `scores` のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全接続が `click` → `scores` の順で 1 通ずつ受け取ることを保証
//! - 同時クリックで加算が失われない（lost update が起きない）ことを保証
//! - 保存に失敗したクリックはブロードキャストされないことを保証
//! - 呼び出し側が途中で中断されても、保存されたクリックは必ずブロードキャストされることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続へのファンアウト
//! - 正常系：同じ名前への多数の同時クリック
//! - 異常系：壊れた接続が混ざっている
//! - 異常系：保存失敗
//! - 異常系：クリック処理中に呼び出し側タスクが abort される

use std::sync::Arc;

use crate::{
    domain::{ConnectionRepository, GameMetrics, ScoreBoard, ScoreRepository},
    infrastructure::dto::websocket::{ClickEvent, encode_click, encode_scores},
};

use super::{ScoreWriteLock, error::RecordClickError};

/// Result of a counted click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// New total of the clicked player
    pub total: u64,
    /// Scoreboard after the click
    pub board: ScoreBoard,
    /// Connections that were sent the updated scoreboard
    pub delivered: usize,
}

/// クリックのユースケース
#[derive(Clone)]
pub struct RecordClickUseCase {
    scores: Arc<dyn ScoreRepository>,
    connections: Arc<dyn ConnectionRepository>,
    metrics: Arc<dyn GameMetrics>,
    write_lock: ScoreWriteLock,
}

impl RecordClickUseCase {
    /// 新しい RecordClickUseCase を作成
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

    /// クリックを 1 回数え、全接続にブロードキャストする
    ///
    /// 読み込みからブロードキャストまでは別タスクで実行されるため、
    /// 呼び出し側の future が途中で破棄されても最後まで完了します。
    ///
    /// # Returns
    ///
    /// * `Ok(ClickOutcome)` - 保存とブロードキャストに成功
    /// * `Err(RecordClickError)` - 保存に失敗（何もブロードキャストしない）
    pub async fn execute(&self, event: ClickEvent) -> Result<ClickOutcome, RecordClickError> {
        let usecase = self.clone();
        tokio::spawn(async move { usecase.record(event).await }).await?
    }

    async fn record(&self, event: ClickEvent) -> Result<ClickOutcome, RecordClickError> {
        let _guard = self.write_lock.lock().await;

        let mut board = self.scores.load().await;
        let total = board.increment(&event.name);
        let click_json = encode_click(&event.name, total)?;
        let scores_json = encode_scores(&board)?;

        self.scores.save(&board).await?;
        self.metrics.record_click(&event.name, total);

        self.connections.broadcast(click_json).await;
        let report = self.connections.broadcast(scores_json).await;

        tracing::info!(
            "Click for '{}' (total {}) broadcast to {} connection(s)",
            event.name,
            total,
            report.delivered
        );

        Ok(ClickOutcome {
            total,
            board,
            delivered: report.delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionIdFactory, MockConnectionRepository, MockScoreRepository, NoopMetrics,
            PlayerName, RepositoryError, Timestamp,
        },
        infrastructure::{
            metrics::PrometheusMetrics,
            repository::{FileScoreRepository, InMemoryConnectionRepository},
        },
        usecase::new_score_write_lock,
    };
    use tokio::sync::mpsc;

    struct TestContext {
        _dir: tempfile::TempDir,
        scores: Arc<FileScoreRepository>,
        connections: Arc<InMemoryConnectionRepository>,
        metrics: Arc<PrometheusMetrics>,
        write_lock: ScoreWriteLock,
    }

    impl TestContext {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let metrics = Arc::new(PrometheusMetrics::new());
            Self {
                scores: Arc::new(FileScoreRepository::new(dir.path().join("clicks.json"))),
                connections: Arc::new(InMemoryConnectionRepository::new(metrics.clone())),
                metrics,
                write_lock: new_score_write_lock(),
                _dir: dir,
            }
        }

        fn usecase(&self) -> RecordClickUseCase {
            RecordClickUseCase::new(
                self.scores.clone(),
                self.connections.clone(),
                self.metrics.clone(),
                self.write_lock.clone(),
            )
        }

        async fn connect(&self) -> mpsc::Receiver<String> {
            let (tx, rx) = mpsc::channel(16);
            self.connections
                .add_connection(ConnectionIdFactory::generate(), tx, Timestamp::new(0))
                .await;
            rx
        }
    }

    fn click(name: &str) -> ClickEvent {
        ClickEvent {
            name: PlayerName::new(name.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_click_increments_and_persists() {
        // テスト項目: クリックで合計が増え、ファイルに保存される
        // given (前提条件):
        let ctx = TestContext::new();
        let usecase = ctx.usecase();

        // when (操作):
        for _ in 0..4 {
            usecase.execute(click("alice")).await.unwrap();
        }
        let outcome = usecase.execute(click("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.total, 5);
        let persisted = ctx.scores.load().await;
        assert_eq!(persisted.total(&click("alice").name), 5);
        assert_eq!(ctx.metrics.clicks_total("alice"), 5);
        assert_eq!(ctx.metrics.score("alice"), Some(5));
    }

    #[tokio::test]
    async fn test_click_broadcasts_click_then_scores_to_all() {
        // テスト項目: 送信者を含む全接続が click → scores の順で 1 通ずつ受け取る
        // given (前提条件):
        let ctx = TestContext::new();
        let mut receivers = vec![ctx.connect().await, ctx.connect().await, ctx.connect().await];

        // when (操作):
        let outcome = ctx.usecase().execute(click("Player_1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.delivered, 3);
        for rx in receivers.iter_mut() {
            assert_eq!(
                rx.recv().await.as_deref(),
                Some(r#"{"type":"click","name":"Player_1","total":1}"#)
            );
            assert_eq!(
                rx.recv().await.as_deref(),
                Some(r#"{"type":"scores","scores":{"Player_1":1}}"#)
            );
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_click_skips_broken_connection() {
        // テスト項目: 壊れた接続は除外され、残り 2 接続には配信される
        // given (前提条件):
        let ctx = TestContext::new();
        let mut alive1 = ctx.connect().await;
        let broken = ctx.connect().await;
        let mut alive2 = ctx.connect().await;
        drop(broken);

        // when (操作):
        let outcome = ctx.usecase().execute(click("bob")).await;

        // then (期待する結果):
        let outcome = outcome.unwrap();
        assert_eq!(outcome.delivered, 2);
        assert_eq!(ctx.connections.count_connections().await, 2);
        for rx in [&mut alive1, &mut alive2] {
            assert!(rx.recv().await.unwrap().contains(r#""type":"click""#));
            assert!(rx.recv().await.unwrap().contains(r#""type":"scores""#));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clicks_are_not_lost() {
        // テスト項目: 同じ名前への同時クリックが全て数えられる（lost update の回帰テスト）
        // given (前提条件):
        let ctx = TestContext::new();
        let clicks = 50;

        // when (操作):
        let mut handles = Vec::new();
        for _ in 0..clicks {
            let usecase = ctx.usecase();
            handles.push(tokio::spawn(async move {
                usecase.execute(click("X")).await.map(|o| o.total)
            }));
        }
        let mut totals = Vec::new();
        for handle in handles {
            totals.push(handle.await.unwrap().unwrap());
        }

        // then (期待する結果): 各クリックが異なる合計を観測し、最終値は 50
        totals.sort_unstable();
        assert_eq!(totals, (1..=clicks).collect::<Vec<u64>>());
        assert_eq!(ctx.scores.load().await.total(&click("X").name), clicks);
    }

    #[tokio::test]
    async fn test_click_not_broadcast_when_save_fails() {
        // テスト項目: 保存に失敗したクリックはブロードキャストされない
        // given (前提条件):
        let mut scores = MockScoreRepository::new();
        scores.expect_load().returning(ScoreBoard::new);
        scores.expect_save().times(1).returning(|_| {
            Err(RepositoryError::FileWrite {
                path: "clicks.json.tmp".into(),
                source: std::io::Error::other("disk full"),
            })
        });
        let mut connections = MockConnectionRepository::new();
        connections.expect_broadcast().times(0);

        let usecase = RecordClickUseCase::new(
            Arc::new(scores),
            Arc::new(connections),
            Arc::new(NoopMetrics),
            new_score_write_lock(),
        );

        // when (操作):
        let result = usecase.execute(click("alice")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RecordClickError::Persist(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_aborted_caller_does_not_split_click_from_broadcast() {
        // テスト項目: クリック処理中に呼び出し側が abort されても、保存された合計と click 配信数が一致する
        // given (前提条件):
        let ctx = TestContext::new();
        let (tx, mut observer) = mpsc::channel(1024);
        ctx.connections
            .add_connection(ConnectionIdFactory::generate(), tx, Timestamp::new(0))
            .await;
        let attempts = 200;

        // when (操作): 実行直後から数回 yield した時点で呼び出し側タスクを abort する
        let mut click_broadcasts = 0u64;
        for i in 0..attempts {
            let usecase = ctx.usecase();
            let handle = tokio::spawn(async move { usecase.execute(click("X")).await });
            for _ in 0..(i % 8) {
                tokio::task::yield_now().await;
            }
            handle.abort();
            let _ = handle.await;

            while let Ok(msg) = observer.try_recv() {
                if msg.contains(r#""type":"click""#) {
                    click_broadcasts += 1;
                }
            }
        }

        // then (期待する結果): ロック取得後は処理中のクリックが無く、保存と配信が食い違わない
        let _guard = ctx.write_lock.lock().await;
        while let Ok(msg) = observer.try_recv() {
            if msg.contains(r#""type":"click""#) {
                click_broadcasts += 1;
            }
        }
        let persisted = ctx.scores.load().await.total(&click("X").name);
        assert_eq!(persisted, click_broadcasts);
        assert_eq!(ctx.connections.count_connections().await, 1);
    }
}
