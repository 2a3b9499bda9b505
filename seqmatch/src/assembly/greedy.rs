//! 最短公共超串（SCS）的贪心近似与穷举精确解。
//!
//! 两者都是教学规模的算法：贪心每轮 O(n²) 次重叠计算，至多 n-1 轮；
//! 穷举需要 n! 个排列。

use log::{debug, info};

use super::overlap::overlap;

/// 一次贪心选择的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestOverlap {
    pub a: usize,
    pub b: usize,
    pub len: usize,
}

/// 在所有有序读段对 (a, b), a != b 中找重叠最长者。
///
/// 平局规则：按 a 升序、再按 b 升序遍历，只有严格更长才替换，
/// 因此取遍历顺序中第一个达到最大值的读段对。
pub fn pick_max_overlap(reads: &[Vec<u8>], min_len: usize) -> Option<BestOverlap> {
    let mut best: Option<BestOverlap> = None;
    for (a, ra) in reads.iter().enumerate() {
        for (b, rb) in reads.iter().enumerate() {
            if a == b {
                continue;
            }
            let len = overlap(ra, rb, min_len);
            if len > best.map_or(0, |x| x.len) {
                best = Some(BestOverlap { a, b, len });
            }
        }
    }
    best
}

/// 贪心 SCS：反复合并重叠最长的一对读段，直到没有重叠 >= `min_len` 的读段对，
/// 然后按当前顺序拼接剩余读段。
///
/// 合并时先移除两条读段，再把合并结果追加到末尾。
pub fn greedy_scs(reads: &[Vec<u8>], min_len: usize) -> Vec<u8> {
    let mut reads: Vec<Vec<u8>> = reads.to_vec();
    let mut merges = 0usize;
    while let Some(best) = pick_max_overlap(&reads, min_len) {
        let (hi, lo) = if best.a > best.b { (best.a, best.b) } else { (best.b, best.a) };
        let rb = reads.remove(hi);
        let ra = reads.remove(lo);
        let (ra, rb) = if best.a > best.b { (rb, ra) } else { (ra, rb) };

        let mut merged = ra;
        merged.extend_from_slice(&rb[best.len..]);
        debug!("merge #{}: overlap {} -> {} bp", merges + 1, best.len, merged.len());
        reads.push(merged);
        merges += 1;
    }
    info!("greedy assembly: {} merges, {} contigs left", merges, reads.len());
    reads.concat()
}

/// 穷举所有排列求精确最短公共超串（相邻读段按最小重叠 1 合并）。
/// 返回最短超串及达到该长度的排列数；输入为空时返回 `None`。
pub fn shortest_common_superstring(reads: &[Vec<u8>]) -> Option<(Vec<u8>, usize)> {
    if reads.is_empty() {
        return None;
    }
    let mut order: Vec<usize> = (0..reads.len()).collect();
    let mut best: Option<(Vec<u8>, usize)> = None;
    permute(&mut order, 0, &mut |perm: &[usize]| {
        let mut sup = reads[perm[0]].clone();
        for w in perm.windows(2) {
            let (a, b) = (&reads[w[0]], &reads[w[1]]);
            let olen = overlap(a, b, 1);
            sup.extend_from_slice(&b[olen..]);
        }
        match &mut best {
            Some((s, cnt)) => {
                if sup.len() < s.len() {
                    *s = sup;
                    *cnt = 1;
                } else if sup.len() == s.len() {
                    *cnt += 1;
                }
            }
            None => best = Some((sup, 1)),
        }
    });
    best
}

/// 按字典序生成排列
fn permute(order: &mut [usize], k: usize, visit: &mut impl FnMut(&[usize])) {
    if k == order.len() {
        visit(order);
        return;
    }
    for i in k..order.len() {
        order[k..=i].rotate_right(1);
        permute(order, k + 1, visit);
        order[k..=i].rotate_left(1);
    }
}
