use super::naive::naive_exact;
use super::tables::BoyerMoore;
use super::MatchReport;
use crate::error::Result;
use crate::util::dna::Alphabet;

/// Boyer-Moore 精确匹配。每个对齐位置从右向左比较，
/// 错配时取坏字符规则与好后缀规则中较大的位移，完整匹配时按 `match_skip` 位移。
///
/// 文本中出现字母表外的符号时，在该字符参与比较并触发坏字符规则时报错。
pub fn boyer_moore(bm: &BoyerMoore, text: &[u8]) -> Result<MatchReport> {
    let p = bm.pattern();
    let m = p.len();
    let mut report = MatchReport::default();
    if m > text.len() {
        return Ok(report);
    }

    let mut i = 0usize;
    while i + m <= text.len() {
        report.alignments += 1;
        let mut shift = 1usize;
        let mut mismatched = false;
        for j in (0..m).rev() {
            report.comparisons += 1;
            let c = text[i + j];
            if p[j] != c {
                let skip_bc = bm.bad_character_rule(j, c, i + j)?;
                let skip_gs = bm.good_suffix_rule(j);
                shift = shift.max(skip_bc).max(skip_gs);
                mismatched = true;
                break;
            }
        }
        if !mismatched {
            report.occurrences.push(i);
            shift = shift.max(bm.match_skip());
        }
        i += shift;
    }
    Ok(report)
}

/// 便捷入口：预处理后匹配。长度 < 2 的模式无法做 Z 预处理，
/// 空模式返回空结果，单字符模式退化为朴素扫描。
pub fn boyer_moore_search(pattern: &[u8], text: &[u8], alphabet: &Alphabet) -> Result<MatchReport> {
    match pattern.len() {
        0 => Ok(MatchReport::default()),
        1 => {
            alphabet.validate(pattern)?;
            Ok(naive_exact(pattern, text))
        }
        _ => {
            let bm = BoyerMoore::new(pattern, alphabet)?;
            boyer_moore(&bm, text)
        }
    }
}
