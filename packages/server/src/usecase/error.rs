//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続処理のエラー
#[derive(Debug, Error)]
pub enum ConnectError {
    /// 初期スコアボードのエンコードに失敗
    #[error("failed to encode initial scoreboard: {0}")]
    Encode(#[from] serde_json::Error),

    /// 初期スコアボードを接続のキューに入れられなかった
    #[error("initial sync failed: {0}")]
    InitialSync(#[from] RepositoryError),
}

/// クリック処理のエラー
#[derive(Debug, Error)]
pub enum RecordClickError {
    /// スコアボードの保存に失敗（ブロードキャストは行われない）
    #[error("failed to persist click: {0}")]
    Persist(#[from] RepositoryError),

    #[error("failed to encode broadcast: {0}")]
    Encode(#[from] serde_json::Error),

    /// クリック処理のタスクが異常終了した
    #[error("click task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// リセット処理のエラー
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("failed to persist reset: {0}")]
    Persist(#[from] RepositoryError),

    #[error("failed to encode broadcast: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("reset task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
