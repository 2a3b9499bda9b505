//! Exact and mismatch-tolerant pattern matching.

pub mod approximate;
pub mod boyer_moore;
pub mod naive;
pub mod tables;

pub use approximate::{approximate_match, ApproxParams, DEFAULT_KMER_LEN};
pub use boyer_moore::{boyer_moore, boyer_moore_search};
pub use naive::{naive_exact, naive_mismatch, naive_with_revcomp};
pub use tables::BoyerMoore;

/// 一次匹配的结果：命中位置（按发现顺序）以及诊断用的计数。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub occurrences: Vec<usize>,
    /// 尝试过的对齐数（近似匹配中为索引命中数）
    pub alignments: usize,
    /// 字符比较次数
    pub comparisons: usize,
}

impl MatchReport {
    /// Appends another report's occurrences and adds its counters.
    pub fn absorb(&mut self, other: MatchReport) {
        self.occurrences.extend(other.occurrences);
        self.alignments += other.alignments;
        self.comparisons += other.comparisons;
    }
}
