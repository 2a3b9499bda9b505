pub const START_CODON: &[u8] = b"ATG";
pub const STOP_CODONS: &[&[u8]] = &[b"TAA", b"TAG", b"TGA"];

/// 正链上的三个阅读框，编号从 1 开始
pub const FRAMES: [usize; 3] = [1, 2, 3];

/// 一个开放阅读框：从 ATG 起到同框第一个终止密码子（含）为止。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orf {
    pub frame: usize,
    /// 0-based 起始偏移
    pub start: usize,
    /// 长度，包含终止密码子
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrfExtremes {
    pub longest: Orf,
    pub shortest: Orf,
}

/// 在阅读框 `frame`（1..=3）中查找 ORF，按起始偏移升序返回。
///
/// 每个 ATG 都单独成为一个 ORF，因此嵌套的 ATG 会得到共享终止密码子的较短 ORF。
/// 没有同框终止密码子的 ATG 不计入。
pub fn find_orfs(seq: &[u8], frame: usize) -> Vec<Orf> {
    let offset = frame.saturating_sub(1);
    let mut orfs = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut i = offset;
    while i + 3 <= seq.len() {
        let codon = &seq[i..i + 3];
        if codon == START_CODON {
            open.push(i);
        } else if STOP_CODONS.contains(&codon) {
            let end = i + 3;
            orfs.extend(open.drain(..).map(|start| Orf { frame, start, len: end - start }));
        }
        i += 3;
    }
    orfs
}

/// 三个阅读框中的全部 ORF，按阅读框再按起始偏移排列。
pub fn find_all_orfs(seq: &[u8]) -> Vec<Orf> {
    FRAMES.iter().flat_map(|&f| find_orfs(seq, f)).collect()
}

/// 最长与最短的 ORF；长度相同时取先出现者。
pub fn orf_extremes<'a, I>(orfs: I) -> Option<OrfExtremes>
where
    I: IntoIterator<Item = &'a Orf>,
{
    let mut it = orfs.into_iter();
    let first = *it.next()?;
    let mut ext = OrfExtremes { longest: first, shortest: first };
    for &o in it {
        if o.len > ext.longest.len {
            ext.longest = o;
        }
        if o.len < ext.shortest.len {
            ext.shortest = o;
        }
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: &[u8] = b"ATGAAATAGCCATGTGA";

    #[test]
    fn orfs_per_frame() {
        assert_eq!(find_orfs(SEQ, 1), vec![Orf { frame: 1, start: 0, len: 9 }]);
        assert!(find_orfs(SEQ, 2).is_empty());
        assert_eq!(find_orfs(SEQ, 3), vec![Orf { frame: 3, start: 11, len: 6 }]);
        assert_eq!(find_all_orfs(SEQ).len(), 2);
    }

    #[test]
    fn nested_starts_share_stop() {
        let orfs = find_orfs(b"ATGATGTAA", 1);
        assert_eq!(
            orfs,
            vec![Orf { frame: 1, start: 0, len: 9 }, Orf { frame: 1, start: 3, len: 6 }]
        );
        let ext = orf_extremes(&orfs).unwrap();
        assert_eq!(ext.longest.start, 0);
        assert_eq!(ext.shortest.start, 3);
    }

    #[test]
    fn start_without_stop_is_not_an_orf() {
        assert!(find_orfs(b"CCATGCCCCCC", 3).is_empty());
        assert!(find_orfs(b"ATGTA", 1).is_empty());
        assert!(find_orfs(b"", 1).is_empty());
    }

    #[test]
    fn stop_before_start_is_ignored() {
        assert_eq!(find_orfs(b"TAGATGTGA", 1), vec![Orf { frame: 1, start: 3, len: 6 }]);
    }

    #[test]
    fn extremes_keep_first_of_equal_length() {
        let orfs = find_orfs(b"ATGTAAATGTAG", 1);
        assert_eq!(orfs.len(), 2);
        let ext = orf_extremes(&orfs).unwrap();
        assert_eq!(ext.longest.start, 0);
        assert_eq!(ext.shortest.start, 0);
        assert!(orf_extremes(&[] as &[Orf]).is_none());
    }
}
