//! UseCase: スコアボード取得
//!
//! 読み込みのみで書き込みロックは取得しません。保存は rename による
//! 置き換えなので、書き込み中でも完全なドキュメントが読まれます。

use std::sync::Arc;

use crate::domain::{ScoreBoard, ScoreRepository};

/// スコアボード取得のユースケース
pub struct GetScoresUseCase {
    scores: Arc<dyn ScoreRepository>,
}

impl GetScoresUseCase {
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    pub async fn execute(&self) -> ScoreBoard {
        self.scores.load().await
    }
}
