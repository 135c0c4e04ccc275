//! 错误类型定义

use thiserror::Error;

/// 五子棋规则与配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GomokuError {
    /// 坐标越界
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i16, col: i16 },

    /// 棋盘不是 N×N
    #[error("Invalid board size: {rows} rows x {cols} cols (expected {expected}x{expected})")]
    InvalidBoardSize {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    /// 格子数不是 15x15
    #[error("Invalid cell count: {len} (expected {expected})")]
    InvalidCellCount { len: usize, expected: usize },

    /// 无法识别的格子字符
    #[error("Invalid cell character: {ch:?}")]
    InvalidCell { ch: char },

    /// 目标格已有棋子
    #[error("Cell ({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },

    /// 无效的配置
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// 棋盘操作结果类型
pub type Result<T> = std::result::Result<T, GomokuError>;
