//! 棋型评估函数
//!
//! 沿横、竖、两条对角线扫描每条直线，找出同色的极大连子段：
//! - 长度 2-4：两端都没有对方棋子且至少一端是空格为活，恰好一端是对方棋子为冲，
//!   两端都是对方棋子为死型不计分。棋盘边缘不算堵，只是不提供空格；
//! - 长度 ≥5：每个长度为 5 的窗口计一次连五，不看两端。

use gomoku_core::{Board, Cell, Position, Stone, BOARD_SIZE, DIRECTIONS, WIN_LENGTH};

use crate::config::{AiConfig, PatternWeights};

/// 棋型统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCounts {
    pub open_twos: u32,
    pub closed_twos: u32,
    pub open_threes: u32,
    pub closed_threes: u32,
    pub open_fours: u32,
    pub closed_fours: u32,
    pub fives: u32,
}

/// 连子段两端的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunShape {
    Open,
    Closed,
    Dead,
}

impl RunShape {
    /// 由两端相邻格子判定（`None` 表示棋盘边缘）
    fn classify(before: Option<Cell>, after: Option<Cell>, opponent: Stone) -> Self {
        let ends = [before, after];
        let blocked = ends.iter().filter(|end| **end == Some(Some(opponent))).count();
        let empty = ends.iter().filter(|end| **end == Some(None)).count();

        match (blocked, empty) {
            (0, 0) => RunShape::Dead,
            (0, _) => RunShape::Open,
            (1, _) => RunShape::Closed,
            _ => RunShape::Dead,
        }
    }
}

impl PatternCounts {
    /// 记录一段极大连子
    fn record_run(&mut self, len: usize, shape: RunShape) {
        if len >= WIN_LENGTH {
            self.fives += (len - WIN_LENGTH + 1) as u32;
            return;
        }

        let slot = match (len, shape) {
            (2, RunShape::Open) => &mut self.open_twos,
            (2, RunShape::Closed) => &mut self.closed_twos,
            (3, RunShape::Open) => &mut self.open_threes,
            (3, RunShape::Closed) => &mut self.closed_threes,
            (4, RunShape::Open) => &mut self.open_fours,
            (4, RunShape::Closed) => &mut self.closed_fours,
            _ => return,
        };
        *slot += 1;
    }

    /// 按权重求和
    pub fn weighted(&self, weights: &PatternWeights) -> f64 {
        self.open_twos as f64 * weights.open_two
            + self.closed_twos as f64 * weights.closed_two
            + self.open_threes as f64 * weights.open_three
            + self.closed_threes as f64 * weights.closed_three
            + self.open_fours as f64 * weights.open_four
            + self.closed_fours as f64 * weights.closed_four
            + self.fives as f64 * weights.five
    }
}

/// 评估器
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: PatternWeights,
    opponent_factor: f64,
}

impl Evaluator {
    pub fn new(weights: PatternWeights, opponent_factor: f64) -> Self {
        Self {
            weights,
            opponent_factor,
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.weights, config.opponent_factor)
    }

    /// 评估棋局（`own` 视角，正值对 `own` 有利）
    pub fn score(&self, board: &Board, own: Stone, opponent: Stone) -> f64 {
        let own_score = Self::count_patterns(board, own).weighted(&self.weights);
        let opp_score = Self::count_patterns(board, opponent).weighted(&self.weights);
        own_score - self.opponent_factor * opp_score
    }

    /// 统计 `stone` 的全部棋型
    pub fn count_patterns(board: &Board, stone: Stone) -> PatternCounts {
        let mut counts = PatternCounts::default();
        for_each_line(board, |cells| {
            scan_runs(cells, stone, |len, shape| counts.record_run(len, shape));
        });
        counts
    }

    /// 统计长度为 `len` 的同色连续窗口数（不看两端）
    ///
    /// 连续 3 子包含 2 个长度为 2 的窗口。
    pub fn count_windows(board: &Board, stone: Stone, len: usize) -> u32 {
        if len == 0 {
            return 0;
        }
        let mut total = 0;
        for_each_line(board, |cells| {
            scan_runs(cells, stone, |run, _| {
                if run >= len {
                    total += (run - len + 1) as u32;
                }
            });
        });
        total
    }
}

/// 依次访问四个方向上的每条完整直线
fn for_each_line(board: &Board, mut visit: impl FnMut(&[Cell])) {
    let mut cells: Vec<Cell> = Vec::with_capacity(BOARD_SIZE);

    for &(dr, dc) in &DIRECTIONS {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let start = Position::new_unchecked(row as u8, col as u8);
                // 只从直线起点出发
                if start.offset(-dr, -dc).is_some() {
                    continue;
                }

                cells.clear();
                let mut cursor = Some(start);
                while let Some(pos) = cursor {
                    cells.push(board.get(pos));
                    cursor = pos.offset(dr, dc);
                }
                visit(&cells);
            }
        }
    }
}

/// 找出直线上 `stone` 的每段极大连子，回调 (长度, 两端状态)
fn scan_runs(cells: &[Cell], stone: Stone, mut on_run: impl FnMut(usize, RunShape)) {
    let mut i = 0;
    while i < cells.len() {
        if cells[i] != Some(stone) {
            i += 1;
            continue;
        }

        let start = i;
        while i < cells.len() && cells[i] == Some(stone) {
            i += 1;
        }

        let before = start.checked_sub(1).map(|j| cells[j]);
        let after = cells.get(i).copied();
        on_run(i - start, RunShape::classify(before, after, stone.opponent()));
    }
}
