use crate::error::{MatchError, Result};

pub const DNA: &[u8] = b"ACGT";
pub const DNA_WITH_N: &[u8] = b"ACGTN";

/// 字母表映射：符号 -> [0, size) 的稠密编号。
/// 仅在一个模式的生命周期内使用，构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    codes: [u8; 256],
}

impl Alphabet {
    const ABSENT: u8 = u8::MAX;

    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(MatchError::InvalidAlphabet("empty alphabet".to_string()));
        }
        if symbols.len() >= Self::ABSENT as usize {
            return Err(MatchError::InvalidAlphabet(format!(
                "too many symbols ({})",
                symbols.len()
            )));
        }
        let mut codes = [Self::ABSENT; 256];
        for (i, &s) in symbols.iter().enumerate() {
            if codes[s as usize] != Self::ABSENT {
                return Err(MatchError::InvalidAlphabet(format!(
                    "duplicate symbol '{}'",
                    s as char
                )));
            }
            codes[s as usize] = i as u8;
        }
        Ok(Self { symbols: symbols.to_vec(), codes })
    }

    /// 核苷酸字母表 ACGT
    pub fn dna() -> Self {
        Self::from_known(DNA)
    }

    /// ACGT 加上未知碱基 N
    pub fn dna_with_n() -> Self {
        Self::from_known(DNA_WITH_N)
    }

    fn from_known(symbols: &[u8]) -> Self {
        let mut codes = [Self::ABSENT; 256];
        for (i, &s) in symbols.iter().enumerate() {
            codes[s as usize] = i as u8;
        }
        Self { symbols: symbols.to_vec(), codes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline]
    pub fn code(&self, symbol: u8) -> Option<usize> {
        let c = self.codes[symbol as usize];
        (c != Self::ABSENT).then_some(c as usize)
    }

    /// 查找符号编号；`position` 仅用于错误信息。
    #[inline]
    pub fn code_at(&self, symbol: u8, position: usize) -> Result<usize> {
        self.code(symbol).ok_or(MatchError::UnsupportedSymbol {
            symbol: symbol as char,
            position,
        })
    }

    /// Fails on the first symbol absent from the alphabet.
    pub fn validate(&self, seq: &[u8]) -> Result<()> {
        for (i, &b) in seq.iter().enumerate() {
            self.code_at(b, i)?;
        }
        Ok(())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        let nb = match up {
            b'A' | b'C' | b'G' | b'T' | b'N' => up,
            b'U' => b'T',
            _ => b'N',
        };
        out.push(nb);
    }
    out
}

#[inline]
pub fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        _ => b'N',
    }
}

pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Phred 质量值 -> Phred+33 ASCII
#[inline]
pub fn q_to_phred33(q: u8) -> u8 {
    q.saturating_add(33)
}

/// Phred+33 ASCII -> Phred 质量值
#[inline]
pub fn phred33_to_q(qual: u8) -> u8 {
    qual.saturating_sub(33)
}
