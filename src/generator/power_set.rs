use log::{debug, info};
use rand::RngCore;

use crate::catalog::ExpressionList;
use crate::config::EngineConfig;
use crate::expression::{Expression, ExpressionError, Operand, Token};
use crate::generator::{finalize, GenerationStrategy};
use crate::operation::Operation;
use crate::utils::{distinct_permutations, multisets, permutations};

/// Brute-force generator: enumerates the full product of operand
/// permutations, operator assignments and merge orders, filtering every
/// candidate through the catalogue's dedup oracle.
pub struct ExpressionPowerSet {
    config: EngineConfig,
}

impl ExpressionPowerSet {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The raw candidate stream over the given operand tuple, lazy and
    /// single-pass. Deduplication happens downstream.
    fn candidates(&self, operands: Vec<Operand>) -> Candidates {
        let num_operations = operands.len().saturating_sub(1);

        let perms = distinct_permutations(&operands);

        // Operator assignments: each multiset of slot operators, expanded
        // into its distinct orderings, processed in reverse enumeration
        // order. Which representative survives per equivalence class depends
        // on this order; the final set does not.
        let mut assignments: Vec<Vec<Operation>> = Vec::new();
        for multiset in multisets(&self.config.ops, num_operations) {
            assignments.extend(distinct_permutations(&multiset));
        }
        assignments.reverse();

        // Merge orders: every permutation of "which operator position merges
        // next" reaches every binary tree shape over the operands.
        let orders = permutations(&(0..num_operations).collect::<Vec<usize>>());

        debug!(
            "candidate space: {} permutations x {} operator assignments x {} merge orders",
            perms.len(),
            assignments.len(),
            orders.len()
        );

        Candidates {
            perms,
            assignments,
            orders,
            generic: operands
                .iter()
                .all(|operand| matches!(operand, Operand::Placeholder(_))),
            rounding: self.config.rounding,
            assignment_index: 0,
            order_index: 0,
            perm_index: 0,
        }
    }

    /// Builds a concrete distinct-expression list for the given numbers.
    /// Repeated values collapse to distinct operand permutations only.
    ///
    /// # Errors
    ///
    /// Propagates expression construction and evaluation faults.
    pub fn concrete_catalogue(
        &self,
        values: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<ExpressionList, ExpressionError> {
        let operands = values.iter().map(|v| Operand::Number(*v)).collect();
        let mut list = ExpressionList::new(
            values.len(),
            self.config.rounding,
            self.config.num_fingerprints,
            false,
            rng,
        );
        let mut enumerated = 0usize;
        for candidate in self.candidates(operands) {
            list.add(candidate?)?;
            enumerated += 1;
        }
        info!(
            "power set over {:?}: {} candidates, {} distinct",
            values,
            enumerated,
            list.len()
        );
        finalize(list, self.config.notation)
    }
}

impl GenerationStrategy for ExpressionPowerSet {
    fn generic_catalogue(&self, rng: &mut dyn RngCore) -> Result<ExpressionList, ExpressionError> {
        let operands = (0..self.config.num_values)
            .map(Operand::Placeholder)
            .collect();
        let mut list = ExpressionList::new(
            self.config.num_values,
            self.config.rounding,
            self.config.num_fingerprints,
            true,
            rng,
        );
        let mut enumerated = 0usize;
        for candidate in self.candidates(operands) {
            list.add(candidate?)?;
            enumerated += 1;
        }
        info!(
            "power set over {} operands: {} candidates, {} distinct (seen {:?})",
            self.config.num_values,
            enumerated,
            list.len(),
            list.seen_counts()
        );
        finalize(list, self.config.notation)
    }
}

/// Lazy product iterator over the three enumeration dimensions. Assignment is
/// the outer dimension, merge order the middle, operand permutation the
/// inner.
struct Candidates {
    perms: Vec<Vec<Operand>>,
    assignments: Vec<Vec<Operation>>,
    orders: Vec<Vec<usize>>,
    generic: bool,
    rounding: Option<u32>,
    assignment_index: usize,
    order_index: usize,
    perm_index: usize,
}

impl Iterator for Candidates {
    type Item = Result<Expression, ExpressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.assignment_index >= self.assignments.len()
            || self.order_index >= self.orders.len()
            || self.perm_index >= self.perms.len()
        {
            return None;
        }

        let candidate = assemble(
            &self.perms[self.perm_index],
            &self.assignments[self.assignment_index],
            &self.orders[self.order_index],
            self.generic,
            self.rounding,
        );

        self.perm_index += 1;
        if self.perm_index == self.perms.len() {
            self.perm_index = 0;
            self.order_index += 1;
            if self.order_index == self.orders.len() {
                self.order_index = 0;
                self.assignment_index += 1;
            }
        }

        Some(candidate)
    }
}

/// Collapses the operand sequence into a single postfix expression by
/// merging two adjacent partial results per step, in the order given by
/// `merge_order` over the operator slot positions.
fn assemble(
    operands: &[Operand],
    assignment: &[Operation],
    merge_order: &[usize],
    generic: bool,
    rounding: Option<u32>,
) -> Result<Expression, ExpressionError> {
    let mut slots: Vec<Vec<Token>> = operands
        .iter()
        .map(|operand| vec![Token::Operand(*operand)])
        .collect();
    let mut used = vec![false; assignment.len()];

    for &slot in merge_order {
        // Earlier merges to the left of this slot have shrunk the list.
        let offset = used[..slot].iter().filter(|&&u| u).count();
        used[slot] = true;
        let at = slot - offset;
        let right = slots.remove(at + 1);
        let left = &mut slots[at];
        left.extend(right);
        left.push(Token::Operator(assignment[slot]));
    }

    let tokens = slots.pop().ok_or(ExpressionError::Empty)?;
    if !slots.is_empty() {
        return Err(ExpressionError::UnreducedOperands(slots.len() + 1));
    }
    Expression::postfix(tokens, generic, rounding)
}
