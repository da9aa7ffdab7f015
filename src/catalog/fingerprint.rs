use std::collections::HashSet;

use rand::{Rng, RngCore};

/// Stable hash key for a rounded value. `-0.0` folds into `0.0` so the sign
/// of zero never splits an equivalence class.
pub(crate) fn value_key(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// One randomly sampled operand vector together with the set of expression
/// values already observed under it.
///
/// Operands are drawn from [1, 2): bounded away from zero so quotients stay
/// well-conditioned, and irrational with probability one so distinct
/// expression classes almost never coincide.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    operands: Vec<f64>,
    seen: HashSet<u64>,
}

impl Fingerprint {
    pub fn sample(num_values: usize, rng: &mut dyn RngCore) -> Self {
        let operands = (0..num_values).map(|_| rng.gen_range(1.0..2.0)).collect();
        Self {
            operands,
            seen: HashSet::new(),
        }
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn contains(&self, value: f64) -> bool {
        self.seen.contains(&value_key(value))
    }

    /// Records a value; returns whether it was new.
    pub fn record(&mut self, value: f64) -> bool {
        self.seen.insert(value_key(value))
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
