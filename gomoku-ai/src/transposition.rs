//! 置换表
//!
//! 缓存已搜索过的局面，键为 (Zobrist 哈希, 剩余深度)。
//! 只有剩余深度完全相同时才复用，浅层搜索的结果不会污染深层搜索。
//!
//! 表的大小固定，槽位冲突时按年龄和深度决定是否替换，内存不会随搜索增长。

use std::sync::atomic::{AtomicU64, Ordering};

use gomoku_core::Position;

/// 默认表大小（MB）
pub const DEFAULT_TT_SIZE_MB: usize = 8;

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断，真实值 ≥ score）
    LowerBound,
    /// 上界（Alpha 截断，真实值 ≤ score）
    UpperBound,
}

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTEntry {
    /// 完整的 Zobrist 哈希（用于验证）
    pub key: u64,
    /// 评估分数
    pub score: f64,
    /// 搜索深度
    pub depth: u8,
    /// 条目类型
    pub entry_type: EntryType,
    /// 该局面下的最佳走法，用于走法排序
    pub best_move: Option<Position>,
    /// 年龄（用于替换策略）
    pub age: u8,
}

impl TTEntry {
    /// 在窗口 (alpha, beta) 内该条目是否可以直接作为结果
    pub fn usable(&self, alpha: f64, beta: f64) -> bool {
        match self.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => self.score >= beta,
            EntryType::UpperBound => self.score <= alpha,
        }
    }
}

/// 置换表
///
/// 使用固定大小的槽位数组
pub struct TranspositionTable {
    /// 条目数组
    entries: Vec<Option<TTEntry>>,
    /// 表大小（条目数）
    size: usize,
    /// 已占用槽位数
    used: usize,
    /// 当前年龄，每次搜索加一
    age: AtomicU64,
    /// 命中次数
    hits: AtomicU64,
    /// 查询次数
    lookups: AtomicU64,
}

impl TranspositionTable {
    /// 创建指定大小的置换表
    ///
    /// # Arguments
    /// * `size_mb` - 表大小（MB）
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        Self::with_entries((size_mb * 1024 * 1024) / entry_size)
    }

    /// 创建恰好 `count` 个槽位的置换表（至少 1 个）
    pub fn with_entries(count: usize) -> Self {
        let size = count.max(1);
        Self {
            entries: vec![None; size],
            size,
            used: 0,
            age: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
        }
    }

    /// 创建默认大小的置换表
    pub fn default_size() -> Self {
        Self::new(DEFAULT_TT_SIZE_MB)
    }

    /// 计算索引，深度参与散列使同一局面的不同深度落在不同槽位
    #[inline]
    fn index(&self, hash: u64, depth: u8) -> usize {
        let mixed = hash ^ (depth as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (mixed % self.size as u64) as usize
    }

    #[inline]
    fn current_age(&self) -> u8 {
        self.age.load(Ordering::Relaxed) as u8
    }

    /// 是否有该局面在该深度下的条目
    pub fn contains(&self, hash: u64, depth: u8) -> bool {
        self.get(hash, depth).is_some()
    }

    /// 读取条目（不计入统计）
    pub fn get(&self, hash: u64, depth: u8) -> Option<&TTEntry> {
        self.entries[self.index(hash, depth)]
            .as_ref()
            .filter(|entry| entry.key == hash && entry.depth == depth)
    }

    /// 查询条目（计入命中率统计）
    pub fn lookup(&self, hash: u64, depth: u8) -> Option<&TTEntry> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let entry = self.get(hash, depth);
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// 存储精确值
    pub fn put(&mut self, hash: u64, depth: u8, score: f64) {
        self.store(hash, depth, score, EntryType::Exact, None);
    }

    /// 存储条目
    ///
    /// 替换策略：
    /// 1. 空槽直接写入
    /// 2. 同一局面同一深度：精确值不被边界值覆盖
    /// 3. 其他局面：旧条目年龄不同，或新条目深度不小于旧条目时替换
    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        score: f64,
        entry_type: EntryType,
        best_move: Option<Position>,
    ) {
        let index = self.index(hash, depth);
        let age = self.current_age();

        let should_replace = match &self.entries[index] {
            None => true,
            Some(existing) if existing.key == hash && existing.depth == depth => {
                !(existing.entry_type == EntryType::Exact && entry_type != EntryType::Exact)
            }
            Some(existing) => existing.age != age || depth >= existing.depth,
        };

        if should_replace {
            if self.entries[index].is_none() {
                self.used += 1;
            }
            self.entries[index] = Some(TTEntry {
                key: hash,
                score,
                depth,
                entry_type,
                best_move,
                age,
            });
        }
    }

    /// 开始一次新搜索（增加年龄）
    pub fn new_search(&self) {
        self.age.fetch_add(1, Ordering::Relaxed);
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.used = 0;
        self.hits.store(0, Ordering::Relaxed);
        self.lookups.store(0, Ordering::Relaxed);
    }

    /// 已占用的槽位数
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// 槽位总数
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// 获取使用率
    pub fn usage(&self) -> f64 {
        self.used as f64 / self.size as f64
    }

    /// 获取命中率
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.used,
            capacity: self.size,
            searches: self.age.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::default_size()
    }
}

/// 置换表统计信息
#[derive(Debug, Clone)]
pub struct TTStats {
    pub entries: usize,
    pub capacity: usize,
    pub searches: u64,
    pub hits: u64,
    pub lookups: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}
