//! 序列注释：多 FASTA 记录统计与开放阅读框。

pub mod orf;
pub mod records;

pub use orf::{find_all_orfs, find_orfs, orf_extremes, Orf, OrfExtremes, FRAMES};
pub use records::{record_stats, sequences_by_id, RecordStats};
