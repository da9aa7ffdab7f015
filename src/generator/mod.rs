//! Catalogue generation strategies.
//!
//! Two independently derived constructions build the same distinct-expression
//! catalogue: a brute-force product enumeration and a dynamic program over
//! operand subsets. They are kept behind one trait so either can back a
//! solver and so tests can cross-validate their outputs against each other.

mod dynamic;
mod power_set;

pub use dynamic::ExpressionDynamicProgramming;
pub use power_set::ExpressionPowerSet;

use rand::RngCore;

use crate::catalog::ExpressionList;
use crate::expression::{ExpressionError, Notation};

/// A pluggable way of constructing the generic catalogue for a fixed
/// configuration.
pub trait GenerationStrategy {
    /// Builds the catalogue of pairwise-distinct generic expressions.
    ///
    /// # Errors
    ///
    /// Propagates expression construction and evaluation faults.
    fn generic_catalogue(&self, rng: &mut dyn RngCore) -> Result<ExpressionList, ExpressionError>;
}

/// Applies the configured cosmetic notation to a finished catalogue.
pub(crate) fn finalize(
    list: ExpressionList,
    notation: Notation,
) -> Result<ExpressionList, ExpressionError> {
    match notation {
        Notation::Postfix => Ok(list),
        Notation::Parenthesized => {
            let num_values = list.num_values();
            let rounding = list.rounding();
            let generic = list.is_generic();
            let expressions = list
                .into_expressions()
                .into_iter()
                .map(|expression| expression.to_parenthetical())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ExpressionList::from_expressions(
                expressions,
                num_values,
                rounding,
                generic,
            ))
        }
    }
}
