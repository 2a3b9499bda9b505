use std::io::Write;

use anyhow::Result as AnyResult;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// 索引构建的元信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMeta {
    pub source_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// k-mer 子串索引：文本中所有长度为 k 的子串的起始偏移，
/// 按 (子串, 偏移) 排序。只存偏移，子串通过文本切片比较，
/// 与后缀数组的存储方式相同。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmerIndex {
    pub k: usize,
    pub text: Vec<u8>,
    /// 排序后的 k-mer 起始偏移
    pub offsets: Vec<u32>,
    pub meta: IndexMeta,
}

/// 可索引文本的最大长度（偏移为 u32）
pub const MAX_TEXT_LEN: usize = u32::MAX as usize;

fn check_text_len(len: usize) -> Result<()> {
    if len > MAX_TEXT_LEN {
        return Err(MatchError::TextTooLong { len, max: MAX_TEXT_LEN });
    }
    Ok(())
}

impl KmerIndex {
    pub fn build(text: &[u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(MatchError::ZeroKmerLength);
        }
        if k > text.len() {
            return Err(MatchError::KmerTooLong { k, text_len: text.len() });
        }
        check_text_len(text.len())?;
        let n = text.len() - k + 1;
        let mut offsets: Vec<u32> = (0..n).map(|o| o as u32).collect();
        offsets.sort_unstable_by(|&a, &b| {
            let (a, b) = (a as usize, b as usize);
            text[a..a + k].cmp(&text[b..b + k]).then(a.cmp(&b))
        });
        debug!("built {}-mer index over {} bp ({} entries)", k, text.len(), n);
        Ok(Self { k, text: text.to_vec(), offsets, meta: IndexMeta::default() })
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    fn kmer_at(&self, off: u32) -> &[u8] {
        let o = off as usize;
        &self.text[o..o + self.k]
    }

    /// 用 `p` 的前 k 个字符查询，返回所有相等 k-mer 的文本偏移（按偏移升序）。
    pub fn query(&self, p: &[u8]) -> Result<Vec<usize>> {
        if p.len() < self.k {
            return Err(MatchError::QueryTooShort { len: p.len(), k: self.k });
        }
        let kmer = &p[..self.k];
        let lo = self.offsets.partition_point(|&o| self.kmer_at(o) < kmer);
        let hits = self.offsets[lo..]
            .iter()
            .take_while(|&&o| self.kmer_at(o) == kmer)
            .map(|&o| o as usize)
            .collect();
        Ok(hits)
    }

    pub fn save_to_file(&self, path: &str) -> AnyResult<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> AnyResult<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(idx)
    }
}
