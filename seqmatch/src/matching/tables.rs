//! Boyer-Moore 预处理表（Gusfield 记号）：
//!
//! - `N[i]`：以 i 结尾、同时是模式后缀的最长子串长度（反转模式的 Z 数组再反转）
//! - `L'[i]`：满足 `N[j] == |P[i..]|` 的最大 j（存 j+1，0 表示不存在）
//! - `L[i]`：`L'` 的前缀最大值，即满足 `N[j] >= |P[i..]|` 的最大 j
//! - `l'[i]`：`P[i..]` 中同时也是模式前缀的最长后缀长度
//! - 坏字符表：每个偏移处记录各符号在其之前最后一次出现的位置 + 1
//!
//! 所有表都是 (模式, 字母表) 的纯函数，构建后只读，可跨线程共享。

use log::debug;

use crate::error::{MatchError, Result};
use crate::util::dna::Alphabet;

/// Z 数组：`z[i]` 为从 i 开始且与 s 前缀相同的最长子串长度。
/// 使用 [l, r] 盒子技巧，均摊 O(|s|)。长度 < 2 的输入直接返回平凡结果。
pub fn z_array(s: &[u8]) -> Vec<usize> {
    let n = s.len();
    if n < 2 {
        return vec![n; n];
    }
    let mut z = vec![0usize; n];
    z[0] = n;

    for i in 1..n {
        if s[i] == s[i - 1] {
            z[1] += 1;
        } else {
            break;
        }
    }

    let (mut l, mut r) = (0usize, 0usize);
    if z[1] > 0 {
        l = 1;
        r = z[1];
    }

    for k in 2..n {
        if k > r {
            // 盒子之外：直接逐字符比较
            let mut len = 0;
            while k + len < n && s[k + len] == s[len] {
                len += 1;
            }
            z[k] = len;
            l = k;
            r = k + len - 1;
        } else {
            let nbeta = r - k + 1;
            let zkp = z[k - l];
            if nbeta > zkp {
                z[k] = zkp;
            } else {
                // 盒子之内但可能越过 r，继续比较 r 之后的字符
                let mut nmatch = 0;
                while r + 1 + nmatch < n && s[r + 1 + nmatch] == s[r + 1 + nmatch - k] {
                    nmatch += 1;
                }
                l = k;
                r += nmatch;
                z[k] = r - k + 1;
            }
        }
    }
    z
}

pub fn n_array(s: &[u8]) -> Vec<usize> {
    let rev: Vec<u8> = s.iter().rev().copied().collect();
    let mut n = z_array(&rev);
    n.reverse();
    n
}

pub fn big_l_prime_array(n: &[usize]) -> Vec<usize> {
    let m = n.len();
    let mut lp = vec![0usize; m];
    for j in 0..m.saturating_sub(1) {
        let i = m - n[j];
        if i < m {
            lp[i] = j + 1;
        }
    }
    lp
}

pub fn big_l_array(lp: &[usize]) -> Vec<usize> {
    let m = lp.len();
    let mut l = vec![0usize; m];
    if m < 2 {
        return l;
    }
    l[1] = lp[1];
    for i in 2..m {
        l[i] = l[i - 1].max(lp[i]);
    }
    l
}

pub fn small_l_prime_array(n: &[usize]) -> Vec<usize> {
    let m = n.len();
    let mut slp = vec![0usize; m];
    for (i, &ni) in n.iter().enumerate() {
        // 前缀同时是后缀
        if ni == i + 1 {
            slp[m - i - 1] = i + 1;
        }
    }
    // 向左填充
    for i in (0..m.saturating_sub(1)).rev() {
        if slp[i] == 0 {
            slp[i] = slp[i + 1];
        }
    }
    slp
}

/// 稠密坏字符表，行优先展平：`tab[i * sigma + c]`。
pub fn dense_bad_char_table(pattern: &[u8], alphabet: &Alphabet) -> Result<Vec<usize>> {
    let sigma = alphabet.len();
    let mut tab = Vec::with_capacity(pattern.len() * sigma);
    let mut next = vec![0usize; sigma];
    for (i, &c) in pattern.iter().enumerate() {
        let ci = alphabet.code_at(c, i)?;
        tab.extend_from_slice(&next);
        next[ci] = i + 1;
    }
    Ok(tab)
}

/// 一个模式及其全部 Boyer-Moore 预处理结果。
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<u8>,
    alphabet: Alphabet,
    bad_char: Vec<usize>,
    big_l: Vec<usize>,
    small_l_prime: Vec<usize>,
}

impl BoyerMoore {
    pub fn new(pattern: &[u8], alphabet: &Alphabet) -> Result<Self> {
        if pattern.len() < 2 {
            return Err(MatchError::DegeneratePattern { len: pattern.len() });
        }
        let bad_char = dense_bad_char_table(pattern, alphabet)?;
        let n = n_array(pattern);
        let lp = big_l_prime_array(&n);
        let big_l = big_l_array(&lp);
        let small_l_prime = small_l_prime_array(&n);
        debug!(
            "preprocessed pattern of length {} over {} symbols ({} bad-char cells)",
            pattern.len(),
            alphabet.len(),
            bad_char.len()
        );
        Ok(Self {
            pattern: pattern.to_vec(),
            alphabet: alphabet.clone(),
            bad_char,
            big_l,
            small_l_prime,
        })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn big_l(&self) -> &[usize] {
        &self.big_l
    }

    pub fn small_l_prime(&self) -> &[usize] {
        &self.small_l_prime
    }

    /// 偏移 i 处与文本字符 c 错配时坏字符规则给出的位移。
    /// `text_pos` 只用于错误信息。
    #[inline]
    pub fn bad_character_rule(&self, i: usize, c: u8, text_pos: usize) -> Result<usize> {
        let ci = self.alphabet.code_at(c, text_pos)?;
        let last = self.bad_char[i * self.alphabet.len() + ci];
        Ok(i + 1 - last)
    }

    /// 偏移 i 处错配时（弱）好后缀规则给出的位移；i 为最后一位时返回 0。
    #[inline]
    pub fn good_suffix_rule(&self, i: usize) -> usize {
        let m = self.big_l.len();
        if i == m - 1 {
            return 0;
        }
        let i = i + 1;
        if self.big_l[i] > 0 {
            m - self.big_l[i]
        } else {
            m - self.small_l_prime[i]
        }
    }

    /// 完整匹配后的位移
    #[inline]
    pub fn match_skip(&self) -> usize {
        self.small_l_prime.len() - self.small_l_prime[1]
    }
}
