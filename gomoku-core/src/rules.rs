//! 胜负判定
//!
//! 任意方向（横、竖、两条对角线）连续 5 子或以上即获胜，长连也算胜。
//! 搜索引擎本身不依赖此模块判断胜负，它服务于外层对局循环和可选的终局剪枝。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BOARD_SIZE, DIRECTIONS, WIN_LENGTH};
use crate::stone::{Position, Stone};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 某方连五获胜
    Won(Stone),
    /// 棋盘已满且无人获胜
    Draw,
}

/// 规则判定
pub struct Rules;

impl Rules {
    /// 经过 `pos` 沿方向 `(dr, dc)` 的同色连子数（含 `pos` 本身）
    ///
    /// `pos` 为空时返回 0。
    pub fn run_length(board: &Board, pos: Position, dr: i8, dc: i8) -> usize {
        let Some(stone) = board.get(pos) else {
            return 0;
        };

        let mut count = 1;
        for sign in [1i8, -1] {
            let mut cursor = pos;
            while let Some(next) = cursor.offset(dr * sign, dc * sign) {
                if board.get(next) != Some(stone) {
                    break;
                }
                count += 1;
                cursor = next;
            }
        }
        count
    }

    /// `pos` 上的棋子是否处于某条连五（或长连）之中
    pub fn is_five_at(board: &Board, pos: Position) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| Self::run_length(board, pos, dr, dc) >= WIN_LENGTH)
    }

    /// 查找获胜方
    pub fn winner(board: &Board) -> Option<Stone> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                let Some(stone) = board.get(pos) else {
                    continue;
                };
                // 只从每条连子的起点向正方向数，避免重复计算
                for &(dr, dc) in &DIRECTIONS {
                    let starts_run = pos
                        .offset(-dr, -dc)
                        .map_or(true, |prev| board.get(prev) != Some(stone));
                    if starts_run && Self::forward_run(board, pos, stone, dr, dc) >= WIN_LENGTH {
                        return Some(stone);
                    }
                }
            }
        }
        None
    }

    /// 判定对局状态
    pub fn status(board: &Board) -> GameStatus {
        match Self::winner(board) {
            Some(stone) => GameStatus::Won(stone),
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    fn forward_run(board: &Board, start: Position, stone: Stone, dr: i8, dc: i8) -> usize {
        let mut count = 1;
        let mut cursor = start;
        while let Some(next) = cursor.offset(dr, dc) {
            if board.get(next) != Some(stone) {
                break;
            }
            count += 1;
            cursor = next;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: Board, cells: &[(u8, u8)], stone: Stone) -> Board {
        cells.iter().fold(board, |b, &(r, c)| {
            b.with_stone(Position::new_unchecked(r, c), stone)
        })
    }

    #[test]
    fn test_no_winner_on_empty() {
        assert_eq!(Rules::winner(&Board::empty()), None);
        assert_eq!(Rules::status(&Board::empty()), GameStatus::InProgress);
    }

    #[test]
    fn test_row_five() {
        let board = place(
            Board::empty(),
            &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
            Stone::Black,
        );
        assert_eq!(Rules::winner(&board), Some(Stone::Black));
        assert!(Rules::is_five_at(&board, Position::new_unchecked(0, 2)));
        assert_eq!(Rules::status(&board), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let board = place(
            Board::empty(),
            &[(5, 5), (6, 6), (7, 7), (8, 8)],
            Stone::White,
        );
        assert_eq!(Rules::winner(&board), None);
        assert_eq!(Rules::run_length(&board, Position::new_unchecked(7, 7), 1, 1), 4);
    }

    #[test]
    fn test_anti_diagonal_edge_five() {
        let board = place(
            Board::empty(),
            &[(10, 14), (11, 13), (12, 12), (13, 11), (14, 10)],
            Stone::White,
        );
        assert_eq!(Rules::winner(&board), Some(Stone::White));
        assert!(Rules::is_five_at(&board, Position::new_unchecked(14, 10)));
    }

    #[test]
    fn test_column_overline_counts() {
        let cells: Vec<(u8, u8)> = (2..8).map(|r| (r, 9)).collect();
        let board = place(Board::empty(), &cells, Stone::Black);
        assert_eq!(Rules::winner(&board), Some(Stone::Black));
    }

    #[test]
    fn test_broken_line_is_not_five() {
        let board = place(
            Board::empty(),
            &[(4, 0), (4, 1), (4, 2), (4, 4), (4, 5)],
            Stone::Black,
        );
        let board = board.with_stone(Position::new_unchecked(4, 3), Stone::White);
        assert_eq!(Rules::winner(&board), None);
        assert_eq!(Rules::run_length(&board, Position::new_unchecked(4, 9), 0, 1), 0);
    }

    #[test]
    fn test_full_board_draw() {
        // 每行按 XXOO 循环并逐行平移两格，任意方向最多连 2 子
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let stone = if (col + 2 * row) % 4 < 2 {
                    Stone::Black
                } else {
                    Stone::White
                };
                board = board.with_stone(Position::new_unchecked(row as u8, col as u8), stone);
            }
        }
        assert_eq!(Rules::status(&board), GameStatus::Draw);
    }
}
