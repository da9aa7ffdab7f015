use log::{debug, info};
use rand::RngCore;

use crate::catalog::{CatalogError, ExpressionList};
use crate::config::EngineConfig;
use crate::expression::{Expression, ExpressionError, Operand, Token};
use crate::generator::{finalize, GenerationStrategy};
use crate::utils::index_combinations;

/// Incremental generator: builds a distinct catalogue for every operand
/// count up to the configured arity, combining the memoized catalogues of
/// smaller subsets instead of rediscovering equivalent sub-shapes the way
/// the brute force does.
pub struct ExpressionDynamicProgramming {
    config: EngineConfig,
}

impl ExpressionDynamicProgramming {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

// All lists involved in a step are generic by construction.
fn relabel_fault(error: CatalogError) -> ExpressionError {
    match error {
        CatalogError::Expression(inner) => inner,
        _ => ExpressionError::NotGeneric,
    }
}

impl GenerationStrategy for ExpressionDynamicProgramming {
    fn generic_catalogue(&self, rng: &mut dyn RngCore) -> Result<ExpressionList, ExpressionError> {
        let config = &self.config;

        // Size-1 base case: the identity template.
        let mut lists: Vec<ExpressionList> = Vec::with_capacity(config.num_values);
        let mut base = ExpressionList::new(1, config.rounding, config.num_fingerprints, true, rng);
        base.add(Expression::postfix(
            vec![Token::Operand(Operand::Placeholder(0))],
            true,
            config.rounding,
        )?)?;
        lists.push(base);

        for k in 2..=config.num_values {
            let mut current =
                ExpressionList::new(k, config.rounding, config.num_fingerprints, true, rng);

            // Each unordered split size once: the left side is always the
            // larger half, so (i, k - i) and (k - i, i) never both run.
            let smallest_left = (k + 1) / 2;
            for i in (smallest_left..k).rev() {
                for left_indices in index_combinations(k, i) {
                    let right_indices: Vec<usize> = (0..k)
                        .filter(|index| !left_indices.contains(index))
                        .collect();

                    let left = lists[i - 1]
                        .relabeled(&left_indices)
                        .map_err(relabel_fault)?;
                    let right = lists[k - i - 1]
                        .relabeled(&right_indices)
                        .map_err(relabel_fault)?;

                    for left_expression in &left {
                        for right_expression in &right {
                            for candidate in
                                left_expression.combined_with(right_expression, &config.ops)?
                            {
                                current.add(candidate)?;
                            }
                        }
                    }
                }
            }

            debug!(
                "size-{} catalogue holds {} distinct expressions",
                k,
                current.len()
            );
            lists.push(current);
        }

        let catalogue = lists.pop().ok_or(ExpressionError::Empty)?;
        info!(
            "dynamic programming over {} operands: {} distinct expressions",
            config.num_values,
            catalogue.len()
        );
        finalize(catalogue, config.notation)
    }
}
