//! ファイルベースの Repository 実装

mod score;

pub use score::FileScoreRepository;
