//! Suffix/prefix overlaps between reads and superstring assembly.

pub mod greedy;
pub mod overlap;

pub use greedy::{greedy_scs, pick_max_overlap, shortest_common_superstring, BestOverlap};
pub use overlap::{overlap, overlap_all_pairs};
