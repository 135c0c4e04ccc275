//! 走法与走法生成
//!
//! 候选走法按顺时针螺旋顺序从棋盘中心向外生成：右、下、左、上循环，
//! 每转两次弯步长加一。顺序是确定的，搜索在分数相同时选择先生成的走法。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::stone::{Position, Stone};

/// 走法：位置 + 落下的棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pos: Position,
    pub stone: Stone,
}

impl Move {
    /// 创建新走法
    pub fn new(pos: Position, stone: Stone) -> Self {
        Self { pos, stone }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.stone.to_char(), self.pos)
    }
}

/// 螺旋方向（行，列）：右、下、左、上
const SPIRAL_STEPS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// 边长为 `size` 的方阵上的螺旋遍历
///
/// 起点为 `((size - 1) / 2, (size - 1) / 2)`，走出边界即终止（不回绕）。
/// 终止前恰好经过每个格子一次。
#[derive(Debug, Clone)]
pub struct Spiral {
    size: i32,
    row: i32,
    col: i32,
    dir: usize,
    leg_len: i32,
    leg_pos: i32,
    turns: u8,
    started: bool,
    done: bool,
}

impl Spiral {
    /// 创建螺旋遍历
    pub fn new(size: usize) -> Self {
        let size = size.min(u8::MAX as usize) as i32;
        let center = (size - 1).max(0) / 2;
        Self {
            size,
            row: center,
            col: center,
            dir: 0,
            leg_len: 1,
            leg_pos: 0,
            turns: 0,
            started: false,
            done: size == 0,
        }
    }

    fn in_bounds(&self) -> bool {
        (0..self.size).contains(&self.row) && (0..self.size).contains(&self.col)
    }
}

impl Iterator for Spiral {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }

        if self.started {
            let (dr, dc) = SPIRAL_STEPS[self.dir];
            self.row += dr;
            self.col += dc;
            self.leg_pos += 1;
            if self.leg_pos == self.leg_len {
                self.leg_pos = 0;
                self.dir = (self.dir + 1) % SPIRAL_STEPS.len();
                self.turns += 1;
                if self.turns == 2 {
                    self.turns = 0;
                    self.leg_len += 1;
                }
            }
        } else {
            self.started = true;
        }

        if !self.in_bounds() {
            self.done = true;
            return None;
        }

        Some(Position::new_unchecked(self.row as u8, self.col as u8))
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 按螺旋顺序惰性生成所有空格
    pub fn generate(board: &Board) -> impl Iterator<Item = Position> + '_ {
        Spiral::new(BOARD_SIZE).filter(move |pos| board.is_empty_at(*pos))
    }

    /// 生成指定棋子的全部走法
    pub fn generate_moves(board: &Board, stone: Stone) -> impl Iterator<Item = Move> + '_ {
        Self::generate(board).map(move |pos| Move::new(pos, stone))
    }
}
