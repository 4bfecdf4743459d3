//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//!
//! スコアを書き換える処理（接続時の初期同期、クリック、リセット）は全て
//! [`ScoreWriteLock`] を取得してから実行します。読み込み・更新・保存・
//! ブロードキャストが 1 つのクリティカルセクションになるため、
//! 同時クリックによる更新の消失は起こらず、各接続が受け取るメッセージの順序も一致します。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_scores;
pub mod record_click;
pub mod reset_scores;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, RecordClickError, ResetError};
pub use get_scores::GetScoresUseCase;
pub use record_click::{ClickOutcome, RecordClickUseCase};
pub use reset_scores::ResetScoresUseCase;

/// Single-writer lock over the scoreboard and its broadcasts.
pub type ScoreWriteLock = Arc<Mutex<()>>;

/// Create a fresh, unlocked [`ScoreWriteLock`].
pub fn new_score_write_lock() -> ScoreWriteLock {
    Arc::new(Mutex::new(()))
}
