//! 棋盘记谱格式
//!
//! 每行 15 个字符：`.` 空，`X` 黑，`O` 白；行之间用 `/` 或空白分隔。

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::{GomokuError, Result};
use crate::stone::{Cell, Position, Stone};

/// 空格字符
pub const EMPTY_CHAR: char = '.';

/// 记谱格式处理
pub struct Notation;

impl Notation {
    /// 解析记谱字符串为棋盘
    pub fn parse(text: &str) -> Result<Board> {
        let rows: Vec<&str> = text
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|row| !row.is_empty())
            .collect();

        let parsed = rows
            .iter()
            .map(|row| Self::parse_row(row))
            .collect::<Result<Vec<Vec<Cell>>>>()?;

        Board::from_rows(parsed)
    }

    /// 解析单行
    fn parse_row(row: &str) -> Result<Vec<Cell>> {
        row.chars()
            .map(|c| match c {
                EMPTY_CHAR => Ok(None),
                _ => Stone::from_char(c)
                    .map(Some)
                    .ok_or(GomokuError::InvalidCell { ch: c }),
            })
            .collect()
    }

    /// 将棋盘转换为记谱字符串
    pub fn to_string(board: &Board) -> String {
        let mut result = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));

        for row in 0..BOARD_SIZE {
            if row > 0 {
                result.push('/');
            }
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                result.push(board.get(pos).map_or(EMPTY_CHAR, |s| s.to_char()));
            }
        }

        result
    }
}
