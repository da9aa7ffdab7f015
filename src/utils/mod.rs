//! Combinatorial helpers shared by the generators.

mod combinatorics;

pub use combinatorics::{distinct_permutations, index_combinations, multisets, permutations};
