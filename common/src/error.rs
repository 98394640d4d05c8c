//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("モデル読み込みエラー: {0}")]
    ModelLoad(String),

    #[error("モデルが読み込まれていません")]
    ModelNotReady,

    #[error("分類エラー: {0}")]
    Classification(String),

    #[error("画像デコードエラー: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
