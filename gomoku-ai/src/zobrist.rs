//! Zobrist 哈希
//!
//! 用于快速计算棋局的哈希值，支持增量更新：
//! 落子时 `hash ^= stone_hash(pos, stone) ^ side_hash()`。

use gomoku_core::{Board, Position, Stone, TOTAL_CELLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_ZOBRIST_SEED;

/// Zobrist 哈希表
///
/// 为每个格子的每种棋子生成一个独立的随机数，创建后只读。
/// 同一张置换表中的条目只在同一个 `ZobristTable` 下有意义。
pub struct ZobristTable {
    /// 棋子哈希值 [stone][position]
    /// stone: 0=Black, 1=White
    /// position: 0-224
    stones: [[u64; TOTAL_CELLS]; 2],
    /// 白方走子时异或的哈希值
    side_to_move: u64,
}

impl ZobristTable {
    /// 使用默认种子创建
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_ZOBRIST_SEED)
    }

    /// 使用指定种子创建（相同种子得到相同的表）
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut stones = [[0u64; TOTAL_CELLS]; 2];
        for stone in 0..2 {
            for pos in 0..TOTAL_CELLS {
                stones[stone][pos] = rng.gen();
            }
        }

        Self {
            stones,
            side_to_move: rng.gen(),
        }
    }

    /// 计算棋盘的哈希值（只含棋子，空格不参与）
    pub fn board_hash(&self, board: &Board) -> u64 {
        board
            .stones()
            .fold(0u64, |hash, (pos, stone)| hash ^ self.stone_hash(pos, stone))
    }

    /// 计算棋盘 + 走子方的哈希值
    pub fn hash(&self, board: &Board, to_move: Stone) -> u64 {
        let hash = self.board_hash(board);
        match to_move {
            Stone::Black => hash,
            Stone::White => hash ^ self.side_to_move,
        }
    }

    /// 获取棋子的哈希值
    #[inline]
    pub fn stone_hash(&self, pos: Position, stone: Stone) -> u64 {
        self.stones[stone.index()][pos.to_index()]
    }

    /// 获取走子方切换的哈希值
    #[inline]
    pub fn side_hash(&self) -> u64 {
        self.side_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
