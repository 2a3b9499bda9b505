use std::collections::{BTreeSet, HashMap};

use log::debug;

/// `a` 的后缀与 `b` 的前缀之间长度 >= `min_len` 的最长重叠；不存在时返回 0。
///
/// 在 `a` 中从左往右查找 `b` 的前 `min_len` 个字符，每找到一处就检查
/// `a` 从该处起的后缀是否是 `b` 的前缀。最靠左的成功位置即为最长重叠。
/// `min_len` 为 0 时按 1 处理。
pub fn overlap(a: &[u8], b: &[u8], min_len: usize) -> usize {
    let min_len = min_len.max(1);
    if a.len() < min_len || b.len() < min_len {
        return 0;
    }
    let seed = &b[..min_len];
    let mut start = 0usize;
    while let Some(pos) = find_from(a, seed, start) {
        if b.starts_with(&a[pos..]) {
            return a.len() - pos;
        }
        start = pos + 1;
    }
    0
}

fn find_from(hay: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if start + needle.len() > hay.len() {
        return None;
    }
    hay[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + start)
}

/// 所有读段之间重叠 >= k 的有向边 (前驱, 后继)，以读段下标表示。
///
/// 先为每个长度为 k 的子串建立 k-mer -> 读段 映射，只有包含前驱末尾 k-mer
/// 的读段才作为候选后继进行 `overlap` 校验。
pub fn overlap_all_pairs(reads: &[Vec<u8>], k: usize) -> Vec<(usize, usize)> {
    let k = k.max(1);
    let mut kmer_map: HashMap<&[u8], BTreeSet<usize>> = HashMap::new();
    for (ri, read) in reads.iter().enumerate() {
        if read.len() < k {
            continue;
        }
        for kmer in read.windows(k) {
            kmer_map.entry(kmer).or_default().insert(ri);
        }
    }

    let mut pairs = Vec::new();
    for (hi, head) in reads.iter().enumerate() {
        if head.len() < k {
            continue;
        }
        let suffix = &head[head.len() - k..];
        let Some(candidates) = kmer_map.get(suffix) else { continue };
        for &ti in candidates {
            if ti != hi && overlap(head, &reads[ti], k) > 0 {
                pairs.push((hi, ti));
            }
        }
    }
    debug!("overlap graph: {} reads, {} edges (k={})", reads.len(), pairs.len(), k);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_basic() {
        assert_eq!(overlap(b"TTACGT", b"CGTACCGT", 3), 3);
        assert_eq!(overlap(b"TTACGT", b"GTACCGT", 3), 0);
        assert_eq!(overlap(b"TTACGT", b"GTACCGT", 2), 2);
        assert_eq!(overlap(b"ABCD", b"CDEF", 2), 2);
    }

    #[test]
    fn overlap_prefers_longest() {
        // 后缀 "ATAT" 与 "AT" 都是 b 的前缀，返回较长者
        assert_eq!(overlap(b"GGATAT", b"ATATCC", 2), 4);
    }

    #[test]
    fn overlap_never_below_min_len() {
        assert_eq!(overlap(b"ACGT", b"GT", 3), 0);
        assert_eq!(overlap(b"GT", b"GTAC", 3), 0);
    }

    #[test]
    fn overlap_monotone_in_min_len() {
        let pairs: [(&[u8], &[u8]); 4] = [
            (b"GGATAT", b"ATATCC"),
            (b"ACGTACGT", b"ACGTTTTT"),
            (b"AAAAAA", b"AAAAAT"),
            (b"CCCC", b"GGGG"),
        ];
        for (a, b) in pairs {
            for k in 1..8 {
                assert!(overlap(a, b, k) >= overlap(a, b, k + 1));
                assert!(overlap(a, b, 1) >= overlap(a, b, k));
            }
        }
    }

    #[test]
    fn all_pairs_edges() {
        let reads: Vec<Vec<u8>> = ["CGTACG", "TACGTA", "GTACGT", "ACGTAC", "GTACGA", "TAGGGA"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        let pairs = overlap_all_pairs(&reads, 4);
        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (0, 4), (1, 0), (1, 3), (2, 1), (2, 3), (3, 0), (3, 2), (3, 4)]
        );
    }
}
