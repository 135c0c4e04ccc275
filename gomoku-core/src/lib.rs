//! 五子棋核心库
//!
//! 包含:
//! - 棋子、坐标、棋盘等核心数据结构
//! - 螺旋顺序走法生成
//! - 胜负判定
//! - 棋盘记谱格式

mod board;
mod constants;
mod error;
mod moves;
mod notation;
mod rules;
mod stone;

pub use board::Board;
pub use constants::*;
pub use error::{GomokuError, Result};
pub use moves::{Move, MoveGenerator, Spiral};
pub use notation::{Notation, EMPTY_CHAR};
pub use rules::{GameStatus, Rules};
pub use stone::{Cell, Position, Stone};
