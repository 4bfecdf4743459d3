//! File Score Repository 実装
//!
//! スコアボード全体を 1 つの JSON ドキュメントとして保存します。
//!
//! ## 書き込み方式
//!
//! 保存は常に全体の上書きです。一時ファイルに書き込み `sync_all` した後、
//! `rename` で置き換えるため、読み込み側が書きかけのファイルを見ることはありません。
//!
//! ## 既知の弱点
//!
//! 読み込みに失敗した場合（壊れた JSON、整数以外の値など）は空のスコアボードとして
//! 扱います。次の保存でその内容は失われます。

use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::domain::{RepositoryError, ScoreBoard, ScoreRepository};

/// JSON ファイルに保存する ScoreRepository 実装
pub struct FileScoreRepository {
    path: PathBuf,
}

impl FileScoreRepository {
    /// 新しい FileScoreRepository を作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 保存先のパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("scores"));
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    async fn write_temp(&self, temp_path: &Path, json: &str) -> std::io::Result<()> {
        if let Some(parent) = temp_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for FileScoreRepository {
    async fn load(&self) -> ScoreBoard {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return ScoreBoard::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read scores from {}: {}. Treating as empty",
                    self.path.display(),
                    e
                );
                return ScoreBoard::new();
            }
        };

        if content.trim().is_empty() {
            return ScoreBoard::new();
        }

        match serde_json::from_str::<ScoreBoard>(&content) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(
                    "Scores file {} is not a valid scoreboard: {}. Treating as empty",
                    self.path.display(),
                    e
                );
                ScoreBoard::new()
            }
        }
    }

    async fn save(&self, board: &ScoreBoard) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(board)?;
        let temp_path = self.temp_path();

        if let Err(source) = self.write_temp(&temp_path, &json).await {
            return Err(RepositoryError::FileWrite {
                path: temp_path,
                source,
            });
        }

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|source| RepositoryError::FileRename {
                from: temp_path.clone(),
                to: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Saved {} player score(s) to {}",
            board.len(),
            self.path.display()
        );
        Ok(())
    }
}
