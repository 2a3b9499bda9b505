/// 编辑距离 DP 的工作缓冲区，可跨调用复用
#[derive(Debug, Default)]
pub struct EditBuffer {
    dp: Vec<usize>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self { dp: Vec::new() }
    }

    fn resize(&mut self, size: usize) {
        self.dp.clear();
        self.dp.resize(size, 0);
    }
}

/// DP 首行的初始化方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// `dp[0][j] = j`，取右下角：完整字符串对完整字符串
    Global,
    /// `dp[0][j] = 0`，取末行最小值：模式可以从文本任意位置开始、在任意位置结束
    SemiGlobal,
}

/// 全局编辑距离（插入 / 删除 / 替换各计 1）。对称，满足三角不等式。
pub fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    fill(a, b, Mode::Global, &mut EditBuffer::new())
}

/// 模式在文本中的最佳近似出现所需的最少编辑数：末行（整行）的最小值。
pub fn approximate_edit_distance(pattern: &[u8], text: &[u8]) -> usize {
    approximate_edit_distance_with_buf(pattern, text, &mut EditBuffer::new())
}

pub fn approximate_edit_distance_with_buf(pattern: &[u8], text: &[u8], buf: &mut EditBuffer) -> usize {
    fill(pattern, text, Mode::SemiGlobal, buf)
}

fn fill(p: &[u8], t: &[u8], mode: Mode, buf: &mut EditBuffer) -> usize {
    let m = p.len();
    let n = t.len();
    let cols = n + 1;
    buf.resize((m + 1) * cols);
    let dp = &mut buf.dp;

    for i in 0..=m {
        dp[i * cols] = i;
    }
    if mode == Mode::Global {
        for j in 0..=n {
            dp[j] = j;
        }
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag = dp[(i - 1) * cols + (j - 1)] + usize::from(p[i - 1] != t[j - 1]);
            let up = dp[(i - 1) * cols + j] + 1;
            let left = dp[i * cols + (j - 1)] + 1;
            dp[i * cols + j] = diag.min(up).min(left);
        }
    }

    let last = &dp[m * cols..(m + 1) * cols];
    match mode {
        Mode::Global => last[n],
        Mode::SemiGlobal => last.iter().copied().min().unwrap_or(m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_known_values() {
        assert_eq!(edit_distance(b"kitten", b"sitting"), 3);
        assert_eq!(edit_distance(b"", b"ACGT"), 4);
        assert_eq!(edit_distance(b"ACGT", b""), 4);
        assert_eq!(edit_distance(b"GATTACA", b"GATTACA"), 0);
        assert_eq!(edit_distance(b"ACGT", b"AGT"), 1);
    }

    #[test]
    fn global_is_symmetric() {
        let pairs: [(&[u8], &[u8]); 3] = [(b"ACGTT", b"AGTTC"), (b"GATTACA", b"TACA"), (b"AAAA", b"CCCCC")];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn global_triangle_inequality() {
        let seqs: [&[u8]; 5] = [b"ACGT", b"AGGT", b"TTACG", b"", b"ACGTACGT"];
        for a in seqs {
            for b in seqs {
                for c in seqs {
                    assert!(edit_distance(a, c) <= edit_distance(a, b) + edit_distance(b, c));
                }
            }
        }
    }

    #[test]
    fn semi_global_finds_pattern_anywhere() {
        let text = b"TTTTTTGATTACATTTTTT";
        assert_eq!(approximate_edit_distance(b"GATTACA", text), 0);
        assert_eq!(approximate_edit_distance(b"GATTTACA", text), 1);
        assert_eq!(approximate_edit_distance(b"GACTACA", text), 1);
        // 全局距离会把文本两端的多余字符也计入
        assert!(edit_distance(b"GATTACA", text) > 10);
    }

    #[test]
    fn semi_global_empty_inputs() {
        assert_eq!(approximate_edit_distance(b"", b"ACGT"), 0);
        assert_eq!(approximate_edit_distance(b"ACG", b""), 3);
    }

    #[test]
    fn buffer_reuse() {
        let mut buf = EditBuffer::new();
        assert_eq!(approximate_edit_distance_with_buf(b"ACGT", b"CCACGTCC", &mut buf), 0);
        assert_eq!(approximate_edit_distance_with_buf(b"AGGT", b"CCACGTCC", &mut buf), 1);
    }
}
