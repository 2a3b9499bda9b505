use std::collections::HashMap;

use crate::io::fasta::FastaRecord;

/// 多 FASTA 文件的记录统计
#[derive(Debug, Clone, Copy)]
pub struct RecordStats<'a> {
    pub count: usize,
    pub longest: &'a FastaRecord,
    pub shortest: &'a FastaRecord,
}

/// 记录数与最长 / 最短记录；长度相同时取文件中先出现者。
pub fn record_stats(records: &[FastaRecord]) -> Option<RecordStats<'_>> {
    let first = records.first()?;
    let mut stats = RecordStats { count: records.len(), longest: first, shortest: first };
    for rec in &records[1..] {
        if rec.seq.len() > stats.longest.seq.len() {
            stats.longest = rec;
        }
        if rec.seq.len() < stats.shortest.seq.len() {
            stats.shortest = rec;
        }
    }
    Some(stats)
}

/// 记录名 -> 序列。重名时后出现的记录覆盖先出现的。
pub fn sequences_by_id(records: &[FastaRecord]) -> HashMap<&str, &[u8]> {
    records.iter().map(|r| (r.id.as_str(), r.seq.as_slice())).collect()
}
