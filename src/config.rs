use crate::expression::Notation;
use crate::operation::{default_operations, Operation};

/// Default number of independent fingerprint vectors.
pub const DEFAULT_FINGERPRINTS: usize = 3;
/// Default decimal precision for value comparisons.
pub const DEFAULT_ROUNDING: u32 = 9;

/// Fixed per-engine configuration, shared by the generators, the catalogue
/// and the solver built on top of them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Operand arity, at least 1.
    pub num_values: usize,
    /// The closed operator set, each tagged commutative or not.
    pub ops: Vec<Operation>,
    /// Decimal places applied to final evaluation results; `None` disables
    /// rounding entirely.
    pub rounding: Option<u32>,
    /// Number of independent fingerprint vectors backing the dedup oracle.
    pub num_fingerprints: usize,
    /// Token form of the finished catalogue. Cosmetic only.
    pub notation: Notation,
}

impl EngineConfig {
    pub fn new(num_values: usize) -> Self {
        Self {
            num_values,
            ops: default_operations(),
            rounding: Some(DEFAULT_ROUNDING),
            num_fingerprints: DEFAULT_FINGERPRINTS,
            notation: Notation::Postfix,
        }
    }

    pub fn with_ops(mut self, ops: Vec<Operation>) -> Self {
        self.ops = ops;
        self
    }

    pub fn with_rounding(mut self, rounding: Option<u32>) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_fingerprints(mut self, num_fingerprints: usize) -> Self {
        self.num_fingerprints = num_fingerprints;
        self
    }

    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }
}

/// The 4-operand 24-game setup.
impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(4)
    }
}
