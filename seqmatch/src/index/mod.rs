pub mod kmer;

pub use kmer::{IndexMeta, KmerIndex};
