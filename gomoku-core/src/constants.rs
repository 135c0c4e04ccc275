//! 棋盘常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 15;

/// 棋盘格子总数
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// 连成一线获胜所需的棋子数
pub const WIN_LENGTH: usize = 5;

/// 四个扫描方向（行，列）增量：横、竖、主对角线、副对角线
pub const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
