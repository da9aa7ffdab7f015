//! Tetraktys - distinct arithmetic expression catalogues and 24-style solving
//!
//! Given N operand slots and a set of binary operators, this library
//! enumerates every semantically distinct way to combine the operands across
//! operand permutations, operator assignments and parenthesization shapes.
//! Extensionally identical expressions (e.g. `a+b` and `b+a`) collapse into
//! one representative through a Monte-Carlo fingerprint oracle. The finished
//! catalogue answers "which combination of these numbers reaches a target
//! value" and drives practice-puzzle generation with a controlled number of
//! solutions.
//!
//! Two independently derived generators build the same catalogue - a
//! brute-force product enumeration ([`ExpressionPowerSet`]) and a dynamic
//! program over operand subsets ([`ExpressionDynamicProgramming`]) - and can
//! be cross-validated against each other through the shared
//! [`GenerationStrategy`] trait.

pub mod catalog;
pub mod config;
pub mod expression;
pub mod generator;
pub mod operation;
pub mod solver;
pub mod utils;

pub use catalog::{CatalogError, ExpressionList, Fingerprint};
pub use config::EngineConfig;
pub use expression::{Expression, ExpressionError, Notation, Operand, Token};
pub use generator::{ExpressionDynamicProgramming, ExpressionPowerSet, GenerationStrategy};
pub use operation::{commutative_operations, default_operations, Operation};
pub use solver::{Question, Solution, Solver, SolverError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Find every distinct expression reaching `goal` from the given values
///
/// This is a convenience function that builds a catalogue for the operand
/// count with default configuration and queries it once. Build a [`Solver`]
/// directly to reuse the catalogue across queries or to control seeding.
///
/// # Errors
///
/// Returns an error when catalogue construction fails or the operand tuple
/// is empty.
///
/// # Examples
///
/// ```
/// use tetraktys::solve;
///
/// let question = solve(&[4.0, 1.0, 8.0, 7.0], 24.0).unwrap();
/// assert!(question.num_solutions() > 0);
/// ```
pub fn solve(values: &[f64], goal: f64) -> Result<Question, SolverError> {
    let mut rng = ChaCha8Rng::from_entropy();
    let strategy = ExpressionDynamicProgramming::new(EngineConfig::new(values.len()));
    let solver = Solver::new(&strategy, &mut rng)?;
    solver.solve(values, goal)
}
