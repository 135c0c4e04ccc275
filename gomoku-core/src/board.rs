//! 棋盘状态
//!
//! 棋盘是不可变值：落子通过复制并设置得到新棋盘，原棋盘保持不变。

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, TOTAL_CELLS};
use crate::error::{GomokuError, Result};
use crate::moves::Move;
use crate::stone::{Cell, Position, Stone};

/// 15x15 棋盘
///
/// 反序列化时校验格子数，长度不是 15x15 的数据直接报错。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    /// 索引为 row * 15 + col，使用 Vec 以支持 serde
    cells: Vec<Cell>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![None; TOTAL_CELLS],
        }
    }

    /// 从逐行格子构建棋盘，要求恰好为 15x15
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(GomokuError::InvalidBoardSize {
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
                expected: BOARD_SIZE,
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != BOARD_SIZE) {
            return Err(GomokuError::InvalidBoardSize {
                rows: rows.len(),
                cols: bad.len(),
                expected: BOARD_SIZE,
            });
        }

        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Cell {
        if pos.is_valid() {
            self.cells[pos.to_index()]
        } else {
            None
        }
    }

    /// 指定位置是否为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.cells[pos.to_index()].is_none()
    }

    /// 复制棋盘并在 `pos` 放置棋子（不检查，调用方保证 `pos` 在棋盘内且为空）
    pub(crate) fn with_stone(&self, pos: Position, stone: Stone) -> Board {
        let mut next = self.clone();
        next.cells[pos.to_index()] = Some(stone);
        next
    }

    /// 执行走法（检查边界和占用），返回新棋盘
    pub fn play(&self, mv: Move) -> Result<Board> {
        let pos = mv.pos;
        if !pos.is_valid() {
            return Err(GomokuError::InvalidPosition {
                row: pos.row as i16,
                col: pos.col as i16,
            });
        }
        if self.cells[pos.to_index()].is_some() {
            return Err(GomokuError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(self.with_stone(pos, mv.stone))
    }

    /// 在 `pos` 放置 `stone`，等同于 `play(Move::new(pos, stone))`
    pub fn place(&self, pos: Position, stone: Stone) -> Result<Board> {
        self.play(Move::new(pos, stone))
    }

    /// 获取所有棋子（按行优先顺序）
    pub fn stones(&self) -> impl Iterator<Item = (Position, Stone)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            let stone = (*cell)?;
            Position::from_index(index).map(|pos| (pos, stone))
        })
    }

    /// 指定颜色的棋子数
    pub fn stone_count(&self, stone: Stone) -> usize {
        self.cells.iter().filter(|c| **c == Some(stone)).count()
    }

    /// 空格数
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = GomokuError;

    fn try_from(cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != TOTAL_CELLS {
            return Err(GomokuError::InvalidCellCount {
                len: cells.len(),
                expected: TOTAL_CELLS,
            });
        }
        Ok(Self { cells })
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert_eq!(board.empty_count(), TOTAL_CELLS);
        assert!(!board.is_full());
        assert_eq!(board.stones().count(), 0);
    }

    #[test]
    fn test_with_stone_leaves_parent_untouched() {
        let parent = Board::empty();
        let pos = Position::new_unchecked(7, 7);

        let child = parent.with_stone(pos, Stone::Black);

        assert_eq!(child.get(pos), Some(Stone::Black));
        assert_eq!(parent.get(pos), None);
        assert_ne!(parent, child);
    }

    #[test]
    fn test_play_rejects_occupied() {
        let pos = Position::new_unchecked(3, 4);
        let board = Board::empty()
            .play(Move::new(pos, Stone::White))
            .unwrap();

        let err = board.play(Move::new(pos, Stone::Black)).unwrap_err();
        assert_eq!(err, GomokuError::Occupied { row: 3, col: 4 });
    }

    #[test]
    fn test_play_rejects_out_of_range() {
        let mv = Move::new(Position::new_unchecked(15, 0), Stone::Black);
        assert!(matches!(
            Board::empty().play(mv),
            Err(GomokuError::InvalidPosition { row: 15, col: 0 })
        ));
    }

    #[test]
    fn test_from_rows_validates_shape() {
        let rows = vec![vec![None; BOARD_SIZE]; BOARD_SIZE - 1];
        assert!(matches!(
            Board::from_rows(rows),
            Err(GomokuError::InvalidBoardSize { rows: 14, .. })
        ));

        let mut rows = vec![vec![None; BOARD_SIZE]; BOARD_SIZE];
        rows[3].pop();
        assert!(matches!(
            Board::from_rows(rows),
            Err(GomokuError::InvalidBoardSize { cols: 14, .. })
        ));

        let mut rows = vec![vec![None; BOARD_SIZE]; BOARD_SIZE];
        rows[2][5] = Some(Stone::White);
        let board = Board::from_rows(rows).unwrap();
        assert_eq!(board.get(Position::new_unchecked(2, 5)), Some(Stone::White));
    }

    #[test]
    fn test_counts_and_full() {
        let mut board = Board::empty();
        for index in 0..TOTAL_CELLS {
            let pos = Position::from_index(index).unwrap();
            let stone = if index % 2 == 0 { Stone::Black } else { Stone::White };
            board = board.with_stone(pos, stone);
        }

        assert!(board.is_full());
        assert_eq!(board.empty_count(), 0);
        assert_eq!(board.stone_count(Stone::Black), 113);
        assert_eq!(board.stone_count(Stone::White), 112);
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count() {
        let short = serde_json::from_str::<Board>("[null, null, null]");
        assert!(short.is_err());

        let long = format!("[{}]", vec!["null"; 300].join(","));
        let err = serde_json::from_str::<Board>(&long).unwrap_err();
        assert!(err.to_string().contains("300"), "{err}");

        let exact = format!("[{}]", vec!["null"; TOTAL_CELLS].join(","));
        let board: Board = serde_json::from_str(&exact).unwrap();
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_try_from_cells() {
        assert_eq!(
            Board::try_from(vec![None; 3]),
            Err(GomokuError::InvalidCellCount { len: 3, expected: TOTAL_CELLS })
        );
        assert!(Board::try_from(vec![Some(Stone::Black); TOTAL_CELLS]).unwrap().is_full());
    }

    #[test]
    fn test_place_is_checked() {
        let pos = Position::new_unchecked(0, 0);
        let board = Board::empty().place(pos, Stone::Black).unwrap();
        assert_eq!(
            board.place(pos, Stone::White),
            Err(GomokuError::Occupied { row: 0, col: 0 })
        );
        assert!(board.place(Position::new_unchecked(15, 0), Stone::White).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let board = Board::empty().with_stone(Position::new_unchecked(1, 2), Stone::Black);
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
