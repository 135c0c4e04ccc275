//! 五子棋 AI 引擎
//!
//! 包含:
//! - 棋型评估函数
//! - Minimax + Alpha-Beta 搜索
//! - Zobrist 哈希
//! - 置换表

mod config;
mod error;
mod evaluate;
mod search;
mod transposition;
mod zobrist;

pub use config::{AiConfig, Difficulty, PatternWeights, DEFAULT_ZOBRIST_SEED};
pub use error::{AiError, Result};
pub use evaluate::{Evaluator, PatternCounts};
pub use search::{Agent, WIN_SCORE};
pub use transposition::{EntryType, TTEntry, TTStats, TranspositionTable, DEFAULT_TT_SIZE_MB};
pub use zobrist::ZobristTable;
