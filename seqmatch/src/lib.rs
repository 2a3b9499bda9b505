//! # seqmatch
//!
//! 面向长序列（如基因组）的字符串匹配与组装原语。
//!
//! 本 crate 提供：
//!
//! - **精确匹配**：朴素扫描与 Boyer-Moore（坏字符 + 好后缀规则）
//! - **近似匹配**：k-mer 索引 + 鸽巢原理，在错配预算内查找模式
//! - **编辑距离**：全局与半全局动态规划
//! - **组装**：后缀 / 前缀重叠检测与贪心最短公共超串
//! - **注释**：多 FASTA 记录统计与开放阅读框（ORF）
//!
//! ## 快速示例
//!
//! ```rust
//! use seqmatch::matching::{boyer_moore_search, approximate_match, ApproxParams};
//! use seqmatch::assembly::greedy_scs;
//! use seqmatch::util::dna::Alphabet;
//!
//! let hits = boyer_moore_search(b"AT", b"ATATAT", &Alphabet::dna()).unwrap();
//! assert_eq!(hits.occurrences, vec![0, 2, 4]);
//!
//! let approx = approximate_match(
//!     b"GATTACA",
//!     b"CCCCGATTACCTTTT",
//!     1,
//!     &ApproxParams::new(3, Alphabet::dna()),
//! )
//! .unwrap();
//! assert_eq!(approx.occurrences, vec![4]);
//!
//! let reads: Vec<Vec<u8>> = vec![b"ABCD".to_vec(), b"CDEF".to_vec(), b"EFGH".to_vec()];
//! assert_eq!(greedy_scs(&reads, 2), b"ABCDEFGH");
//! ```
//!
//! ## 模块说明
//!
//! - [`matching`] — 朴素、Boyer-Moore 与近似匹配
//! - [`index`] — k-mer 子串索引
//! - [`align`] — 编辑距离
//! - [`assembly`] — 重叠检测与超串组装
//! - [`annotate`] — 记录统计与 ORF 查找
//! - [`io`] — FASTA / FASTQ 文件解析
//! - [`util`] — 字母表映射、反向互补等工具函数

pub mod align;
pub mod annotate;
pub mod assembly;
pub mod error;
pub mod index;
pub mod io;
pub mod matching;
pub mod util;

pub use error::{MatchError, Result};
