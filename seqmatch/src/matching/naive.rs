use super::MatchReport;
use crate::util::dna;

/// 朴素精确匹配：逐个对齐位置、逐字符比较，首个错配即放弃该对齐。
pub fn naive_exact(pattern: &[u8], text: &[u8]) -> MatchReport {
    let mut report = MatchReport::default();
    if pattern.is_empty() || pattern.len() > text.len() {
        return report;
    }
    for i in 0..=text.len() - pattern.len() {
        report.alignments += 1;
        let mut matched = true;
        for (j, &p) in pattern.iter().enumerate() {
            report.comparisons += 1;
            if text[i + j] != p {
                matched = false;
                break;
            }
        }
        if matched {
            report.occurrences.push(i);
        }
    }
    report
}

/// 允许至多 `max_mismatches` 个错配的朴素匹配。
/// 每个对齐位置都比较完整个模式，因此 comparisons = alignments * |P|。
pub fn naive_mismatch(pattern: &[u8], text: &[u8], max_mismatches: usize) -> MatchReport {
    let mut report = MatchReport::default();
    if pattern.is_empty() || pattern.len() > text.len() {
        return report;
    }
    for i in 0..=text.len() - pattern.len() {
        report.alignments += 1;
        let mut mismatches = 0usize;
        for (j, &p) in pattern.iter().enumerate() {
            report.comparisons += 1;
            if text[i + j] != p {
                mismatches += 1;
            }
        }
        if mismatches <= max_mismatches {
            report.occurrences.push(i);
        }
    }
    report
}

/// Exact search on both strands. Offsets for the reverse complement follow the
/// forward ones; a pattern equal to its own reverse complement is searched once.
pub fn naive_with_revcomp(pattern: &[u8], text: &[u8]) -> MatchReport {
    let mut report = naive_exact(pattern, text);
    let rc = dna::revcomp(pattern);
    if rc != pattern {
        report.absorb(naive_exact(&rc, text));
    }
    report
}
