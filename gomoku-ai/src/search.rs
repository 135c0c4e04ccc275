//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝 + 置换表
//!
//! AI 一方始终为极大方，对手始终为极小方。根节点按螺旋顺序展开子节点，
//! 分数相同时保留先生成的走法；内部节点先试置换表记录的最佳走法，再按螺旋顺序。

use std::num::NonZeroU8;

use gomoku_core::{Board, Move, MoveGenerator, Position, Rules, Stone};

use crate::config::{AiConfig, Difficulty};
use crate::error::Result;
use crate::evaluate::Evaluator;
use crate::transposition::{EntryType, TTStats, TranspositionTable};
use crate::zobrist::ZobristTable;

/// 搜索树内连五的基础分值（仅在 `stop_on_five` 开启时使用）
pub const WIN_SCORE: f64 = 1.0e9;

/// 五子棋 AI
pub struct Agent {
    own: Stone,
    config: AiConfig,
    evaluator: Evaluator,
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes_searched: u64,
    last_score: Option<f64>,
}

impl Agent {
    /// 创建 AI，配置无效时立即失败
    pub fn new(own: Stone, config: AiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(own, config))
    }

    /// 从难度创建
    pub fn from_difficulty(own: Stone, difficulty: Difficulty) -> Self {
        Self::build(own, AiConfig::from_difficulty(difficulty))
    }

    fn build(own: Stone, config: AiConfig) -> Self {
        Self {
            own,
            evaluator: Evaluator::from_config(&config),
            zobrist: ZobristTable::with_seed(config.zobrist_seed),
            tt: TranspositionTable::new(config.tt_size_mb),
            config,
            nodes_searched: 0,
            last_score: None,
        }
    }

    /// AI 执子颜色
    pub fn own_stone(&self) -> Stone {
        self.own
    }

    /// 对手执子颜色
    pub fn opponent_stone(&self) -> Stone {
        self.own.opponent()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 按配置的深度搜索
    pub fn search(&mut self, board: &Board) -> Option<Position> {
        self.next_move(board, self.config.search_depth())
    }

    /// 搜索最佳落子点
    ///
    /// 棋盘已满时返回 `None`（和棋），不视为错误。
    pub fn next_move(&mut self, board: &Board, depth: NonZeroU8) -> Option<Position> {
        if self.config.clear_cache_between_moves {
            self.tt.clear();
        }
        self.tt.new_search();
        self.nodes_searched = 0;
        self.last_score = None;

        let own = self.own;
        let remaining = depth.get() - 1;
        let root_hash = self.zobrist.hash(board, own);

        let mut best: Option<(Position, f64)> = None;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        for pos in MoveGenerator::generate(board) {
            let Ok(child) = board.play(Move::new(pos, own)) else {
                continue;
            };
            let child_hash = root_hash ^ self.zobrist.stone_hash(pos, own) ^ self.zobrist.side_hash();

            let score = self.child_value(&child, child_hash, pos, own, remaining, false, alpha, beta);

            // 严格大于才替换：同分保留先生成的走法
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
            alpha = alpha.max(score);
        }

        let Some((pos, score)) = best else {
            tracing::warn!("棋盘已满，没有可落子的位置");
            return None;
        };

        self.last_score = Some(score);
        tracing::debug!(
            depth = depth.get(),
            nodes = self.nodes_searched,
            score,
            tt_hit_rate = self.tt.hit_rate(),
            "搜索完成"
        );
        tracing::info!("AI ({:?}) 落子: {}, 分数: {}", own, pos, score);

        Some(pos)
    }

    /// 子节点取值：可选的连五终止检查，否则继续 Alpha-Beta
    #[allow(clippy::too_many_arguments)]
    fn child_value(
        &mut self,
        child: &Board,
        hash: u64,
        placed: Position,
        mover: Stone,
        depth: u8,
        maximizing: bool,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        if self.config.stop_on_five && Rules::is_five_at(child, placed) {
            self.nodes_searched += 1;
            // 剩余深度越大说明连五越早，优先更快的胜利、更晚的失败
            let margin = WIN_SCORE + depth as f64;
            return if mover == self.own { margin } else { -margin };
        }

        self.alpha_beta(child, hash, depth, maximizing, alpha, beta)
    }

    /// Alpha-Beta 搜索（fail-soft）
    fn alpha_beta(
        &mut self,
        board: &Board,
        hash: u64,
        depth: u8,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.nodes_searched += 1;

        let mut hint = None;
        if let Some(entry) = self.tt.lookup(hash, depth) {
            if entry.usable(alpha, beta) {
                return entry.score;
            }
            hint = entry.best_move;
        }

        // 到达深度限制，返回评估值
        if depth == 0 {
            let score = self.evaluate(board);
            self.tt.put(hash, 0, score);
            return score;
        }

        let alpha_orig = alpha;
        let beta_orig = beta;
        let mover = if maximizing { self.own } else { self.own.opponent() };
        let side_hash = self.zobrist.side_hash();

        let mut best_score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for pos in ordered_moves(board, hint) {
            let Ok(child) = board.play(Move::new(pos, mover)) else {
                continue;
            };
            let child_hash = hash ^ self.zobrist.stone_hash(pos, mover) ^ side_hash;

            let score =
                self.child_value(&child, child_hash, pos, mover, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(pos);
                }
                alpha = alpha.max(best_score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(pos);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break; // 剪枝
            }
        }

        // 无子可下（棋盘已满）
        if best_move.is_none() {
            let score = self.evaluate(board);
            self.tt.put(hash, depth, score);
            return score;
        }

        let entry_type = if best_score <= alpha_orig {
            EntryType::UpperBound
        } else if best_score >= beta_orig {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt.store(hash, depth, best_score, entry_type, best_move);

        best_score
    }

    /// 评估当前局面（AI 视角）
    fn evaluate(&self, board: &Board) -> f64 {
        self.evaluator.score(board, self.own, self.own.opponent())
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 上一次搜索所选走法的分数
    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// 清空置换表
    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }
}

/// 走法排序：置换表给出的走法在前，其余按螺旋顺序
fn ordered_moves(board: &Board, hint: Option<Position>) -> impl Iterator<Item = Position> + '_ {
    let hint = hint.filter(|pos| board.is_empty_at(*pos));
    hint.into_iter()
        .chain(MoveGenerator::generate(board).filter(move |pos| Some(*pos) != hint))
}
