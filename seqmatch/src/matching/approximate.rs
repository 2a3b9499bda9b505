use std::collections::BTreeSet;

use log::debug;

use super::MatchReport;
use crate::error::{MatchError, Result};
use crate::index::kmer::KmerIndex;
use crate::util::dna::Alphabet;

pub const DEFAULT_KMER_LEN: usize = 8;

#[derive(Clone, Debug)]
pub struct ApproxParams {
    /// 索引的 k-mer 长度，与错配预算无关
    pub kmer_len: usize,
    /// 模式与文本必须落在该字母表内
    pub alphabet: Alphabet,
}

impl ApproxParams {
    pub fn new(kmer_len: usize, alphabet: Alphabet) -> Self {
        Self { kmer_len, alphabet }
    }
}

impl Default for ApproxParams {
    fn default() -> Self {
        Self { kmer_len: DEFAULT_KMER_LEN, alphabet: Alphabet::dna() }
    }
}

/// 错配预算为 `max_mismatches` 时的鸽巢段长
#[inline]
fn segment_length(m: usize, max_mismatches: usize) -> usize {
    m / max_mismatches.saturating_add(1)
}

/// 基于鸽巢原理的近似匹配。
///
/// 模式被切成 `max_mismatches + 1` 段互不重叠的片段，若整体错配数 <= k，
/// 至少有一段完全精确匹配，因此用 k-mer 索引精确查找每段开头的 k-mer 即可得到
/// 全部候选位置，再逐个校验其余位置的错配数。
///
/// 每段至少要有 `kmer_len` 个字符，所以模式长度不得小于
/// `(max_mismatches + 1) * kmer_len`，否则返回 [`MatchError::SegmentTooShort`]。
/// 默认 `kmer_len = 8` 时，1 个错配至少需要 16 bp 的模式。
///
/// 模式与文本先按 `params.alphabet` 校验，出现字母表外的符号时返回
/// [`MatchError::UnsupportedSymbol`]。
///
/// 返回的 `occurrences` 去重并按偏移升序；`alignments` 为索引命中数，
/// `comparisons` 为校验阶段的字符比较数。
pub fn approximate_match(
    pattern: &[u8],
    text: &[u8],
    max_mismatches: usize,
    params: &ApproxParams,
) -> Result<MatchReport> {
    let m = pattern.len();
    if m == 0 {
        return Ok(MatchReport::default());
    }
    params.alphabet.validate(pattern)?;
    if m > text.len() {
        return Ok(MatchReport::default());
    }
    params.alphabet.validate(text)?;
    let kmer_len = params.kmer_len;
    if kmer_len == 0 {
        return Err(MatchError::ZeroKmerLength);
    }
    let segment_len = segment_length(m, max_mismatches);
    if segment_len < kmer_len {
        return Err(MatchError::SegmentTooShort { segment_len, kmer_len });
    }

    let index = KmerIndex::build(text, kmer_len)?;
    search_index(pattern, &index, max_mismatches)
}

/// 使用已构建的索引做近似匹配；段长必须不小于索引的 k。
/// 模式与索引文本都按 `alphabet` 校验。
pub fn approximate_match_with_index(
    pattern: &[u8],
    index: &KmerIndex,
    max_mismatches: usize,
    alphabet: &Alphabet,
) -> Result<MatchReport> {
    if pattern.is_empty() {
        return Ok(MatchReport::default());
    }
    alphabet.validate(pattern)?;
    alphabet.validate(&index.text)?;
    search_index(pattern, index, max_mismatches)
}

fn search_index(pattern: &[u8], index: &KmerIndex, max_mismatches: usize) -> Result<MatchReport> {
    let text = &index.text;
    let m = pattern.len();
    let mut report = MatchReport::default();
    if m == 0 || m > text.len() {
        return Ok(report);
    }
    let segment_len = segment_length(m, max_mismatches);
    if segment_len < index.k {
        return Err(MatchError::SegmentTooShort { segment_len, kmer_len: index.k });
    }

    let mut found = BTreeSet::new();
    for seg in 0..=max_mismatches {
        let start = seg * segment_len;
        let end = ((seg + 1) * segment_len).min(m);
        let hits = index.query(&pattern[start..end])?;
        report.alignments += hits.len();

        // 精确命中的只有段首 k 个字符，其余位置都需要校验
        let seed_end = start + index.k;
        for hit in hits {
            let Some(offset) = hit.checked_sub(start) else { continue };
            if offset + m > text.len() || found.contains(&offset) {
                continue;
            }
            let window = &text[offset..offset + m];
            let mut mismatches = 0usize;
            for j in (0..start).chain(seed_end..m) {
                report.comparisons += 1;
                if pattern[j] != window[j] {
                    mismatches += 1;
                    if mismatches > max_mismatches {
                        break;
                    }
                }
            }
            if mismatches <= max_mismatches {
                found.insert(offset);
            }
        }
    }

    debug!(
        "approximate match: {} index hits, {} verified offsets",
        report.alignments,
        found.len()
    );
    report.occurrences = found.into_iter().collect();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::boyer_moore::boyer_moore_search;
    use crate::matching::naive::naive_mismatch;

    fn params(k: usize) -> ApproxParams {
        ApproxParams::new(k, Alphabet::dna())
    }

    #[test]
    fn finds_single_mismatch_occurrence() {
        let text = b"CCCCGATTACCTTTTGATTACATT";
        let r = approximate_match(b"GATTACA", text, 1, &params(3)).unwrap();
        assert_eq!(r.occurrences, vec![4, 15]);
    }

    #[test]
    fn zero_budget_is_exact() {
        let text = b"ACGTTGCAACGTTGCAAAACGTTGCA";
        let r = approximate_match(b"ACGTTGCA", text, 0, &params(8)).unwrap();
        let bm = boyer_moore_search(b"ACGTTGCA", text, &Alphabet::dna()).unwrap();
        assert_eq!(r.occurrences, bm.occurrences);
    }

    #[test]
    fn rejects_segments_shorter_than_kmer() {
        let err = approximate_match(b"GATTACA", b"GATTACAGATTACA", 1, &params(8)).unwrap_err();
        assert_eq!(err, MatchError::SegmentTooShort { segment_len: 3, kmer_len: 8 });
    }

    #[test]
    fn pattern_longer_than_text_is_empty() {
        let r = approximate_match(b"ACGTACGTACGT", b"ACGT", 1, &params(4)).unwrap();
        assert!(r.occurrences.is_empty());
    }

    #[test]
    fn long_segment_tail_is_verified() {
        // 段长 6 > k=3：段首 3 个字符精确命中，后 3 个字符必须计入错配
        let text = b"AAAAAAAAAAAAACGTTT";
        let r = approximate_match(b"ACGCCC", text, 0, &params(3)).unwrap();
        assert!(r.occurrences.is_empty());
    }

    #[test]
    fn matches_exhaustive_scan() {
        let mut x: u32 = 2024;
        let mut next = || {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            b"ACGT"[(x >> 16) as usize % 4]
        };
        let mut text: Vec<u8> = (0..3000).map(|_| next()).collect();
        let pattern: Vec<u8> = text[1000..1024].to_vec();
        // 植入带错配的拷贝
        let mut mutated = pattern.clone();
        mutated[3] = if mutated[3] == b'A' { b'C' } else { b'A' };
        mutated[20] = if mutated[20] == b'G' { b'T' } else { b'G' };
        text[2000..2024].copy_from_slice(&mutated);

        for k in 0..=2 {
            let approx = approximate_match(&pattern, &text, k, &params(6)).unwrap();
            let naive = naive_mismatch(&pattern, &text, k);
            assert_eq!(approx.occurrences, naive.occurrences, "k={}", k);
        }
        let r = approximate_match(&pattern, &text, 2, &params(6)).unwrap();
        assert!(r.occurrences.contains(&1000));
        assert!(r.occurrences.contains(&2000));
    }

    #[test]
    fn huge_budget_is_segment_error() {
        let err = approximate_match(b"GATTACAGATTACA", b"GATTACAGATTACAGG", usize::MAX, &params(3))
            .unwrap_err();
        assert_eq!(err, MatchError::SegmentTooShort { segment_len: 0, kmer_len: 3 });

        let idx = KmerIndex::build(b"GATTACAGATTACAGG", 3).unwrap();
        let err = approximate_match_with_index(b"GATTACA", &idx, usize::MAX, &Alphabet::dna())
            .unwrap_err();
        assert_eq!(err, MatchError::SegmentTooShort { segment_len: 0, kmer_len: 3 });
    }

    #[test]
    fn unsupported_text_symbol_agrees_with_boyer_moore() {
        let text = b"ACGTXACGTACGT";
        let bm = boyer_moore_search(b"ACGTA", text, &Alphabet::dna()).unwrap_err();
        let approx = approximate_match(b"ACGTA", text, 0, &params(3)).unwrap_err();
        assert_eq!(bm, MatchError::UnsupportedSymbol { symbol: 'X', position: 4 });
        assert_eq!(approx, bm);
    }

    #[test]
    fn unsupported_pattern_symbol_rejected() {
        let err = approximate_match(b"ACGNACGT", b"ACGTACGTACGT", 1, &params(3)).unwrap_err();
        assert_eq!(err, MatchError::UnsupportedSymbol { symbol: 'N', position: 3 });

        let with_n = ApproxParams::new(3, Alphabet::dna_with_n());
        let r = approximate_match(b"ACGNACGT", b"ACGTACGTACGT", 1, &with_n).unwrap();
        assert_eq!(r.occurrences, vec![0, 4]);
    }

    #[test]
    fn index_search_validates_inputs() {
        let idx = KmerIndex::build(b"ACGTXACGTACGT", 3).unwrap();
        let err = approximate_match_with_index(b"ACGTA", &idx, 0, &Alphabet::dna()).unwrap_err();
        assert_eq!(err, MatchError::UnsupportedSymbol { symbol: 'X', position: 4 });

        let idx = KmerIndex::build(b"ACGTTACGTACGT", 3).unwrap();
        let r = approximate_match_with_index(b"ACGTA", &idx, 0, &Alphabet::dna()).unwrap();
        assert_eq!(r.occurrences, vec![5]);
    }
}
