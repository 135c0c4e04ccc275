//! AI 错误类型

use gomoku_core::GomokuError;
use thiserror::Error;

/// AI 引擎错误
#[derive(Error, Debug)]
pub enum AiError {
    /// 棋盘或配置错误
    #[error("Gomoku error: {0}")]
    Gomoku(#[from] GomokuError),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// AI 操作结果类型
pub type Result<T> = std::result::Result<T, AiError>;
