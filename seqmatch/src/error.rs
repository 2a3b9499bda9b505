//! 核心算法的错误类型。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// 序列中出现字母表之外的符号
    #[error("unsupported symbol '{symbol}' at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },

    /// Z 算法要求模式长度 >= 2
    #[error("pattern of length {len} is too short for Boyer-Moore preprocessing (need >= 2)")]
    DegeneratePattern { len: usize },

    #[error("k-mer length {k} exceeds text length {text_len}")]
    KmerTooLong { k: usize, text_len: usize },

    /// 索引偏移以 u32 存储
    #[error("text of length {len} exceeds the indexable maximum of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("k-mer length must be positive")]
    ZeroKmerLength,

    #[error("query of length {len} is shorter than index k-mer length {k}")]
    QueryTooShort { len: usize, k: usize },

    /// 鸽巢划分后每段长度不足以做一次 k-mer 查询
    #[error("pattern segment length {segment_len} is shorter than k-mer length {kmer_len}")]
    SegmentTooShort { segment_len: usize, kmer_len: usize },

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
