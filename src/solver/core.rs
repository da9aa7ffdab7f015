use std::collections::HashSet;
use std::ops::RangeInclusive;

use log::{debug, info, warn};
use rand::{Rng, RngCore};

use crate::catalog::{value_key, ExpressionList};
use crate::generator::GenerationStrategy;
use crate::solver::constants::EPSILON;
use crate::solver::errors::SolverError;
use crate::solver::question::{Question, Solution};

/// Query surface over one finished generic catalogue: answers which
/// expressions hit a goal for a concrete operand tuple, and generates
/// practice questions with a controlled number of solutions.
pub struct Solver {
    catalogue: ExpressionList,
    num_values: usize,
}

impl Solver {
    /// Builds a solver by running the given generation strategy to
    /// completion.
    ///
    /// # Errors
    ///
    /// Propagates catalogue construction faults.
    pub fn new(
        strategy: &dyn GenerationStrategy,
        rng: &mut dyn RngCore,
    ) -> Result<Self, SolverError> {
        let catalogue = strategy.generic_catalogue(rng)?;
        info!(
            "solver ready: {} distinct expressions over {} operands",
            catalogue.len(),
            catalogue.num_values()
        );
        Ok(Self {
            num_values: catalogue.num_values(),
            catalogue,
        })
    }

    /// Adopts a pre-built generic catalogue, e.g. one read back from the
    /// persisted line format.
    ///
    /// # Errors
    ///
    /// `ConcreteCatalogue` when the list is not generic.
    pub fn with_catalogue(catalogue: ExpressionList) -> Result<Self, SolverError> {
        if !catalogue.is_generic() {
            return Err(SolverError::ConcreteCatalogue);
        }
        Ok(Self {
            num_values: catalogue.num_values(),
            catalogue,
        })
    }

    pub fn catalogue(&self) -> &ExpressionList {
        &self.catalogue
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// Returns the question holding every distinct expression whose value
    /// equals `goal` for the given operands. Undefined evaluations are
    /// skipped, never matched.
    ///
    /// # Errors
    ///
    /// `ArityMismatch` when the tuple length differs from the solver's
    /// operand count.
    pub fn solve(&self, values: &[f64], goal: f64) -> Result<Question, SolverError> {
        if values.len() != self.num_values {
            return Err(SolverError::ArityMismatch {
                expected: self.num_values,
                supplied: values.len(),
            });
        }
        let mut solutions = Vec::new();
        for expression in &self.catalogue {
            if let Some(value) = expression.evaluate_with(values)? {
                if (value - goal).abs() <= EPSILON {
                    solutions.push(Solution::new(
                        expression.clone(),
                        expression.substitute(values)?,
                    ));
                }
            }
        }
        debug!(
            "{:?} -> {}: {} solutions",
            values,
            goal,
            solutions.len()
        );
        Ok(Question::new(values.to_vec(), goal, solutions))
    }

    /// Rejection sampling: draws random integer tuples from `value_range`
    /// until a question's solution count falls within `solution_range`.
    ///
    /// Exhausting `max_attempts` is not a fault; the last attempt is
    /// returned (possibly out of range) and callers check the solution count
    /// themselves.
    ///
    /// # Errors
    ///
    /// `NoAttempts` when `max_attempts` is zero; propagates `solve` faults.
    pub fn create_valid_question(
        &self,
        rng: &mut dyn RngCore,
        goal: f64,
        value_range: RangeInclusive<i64>,
        solution_range: RangeInclusive<usize>,
        max_attempts: usize,
    ) -> Result<Question, SolverError> {
        let mut last = None;
        for attempt in 1..=max_attempts {
            let values: Vec<f64> = (0..self.num_values)
                .map(|_| rng.gen_range(value_range.clone()) as f64)
                .collect();
            let question = self.solve(&values, goal)?;
            if solution_range.contains(&question.num_solutions()) {
                debug!("question accepted after {} attempts", attempt);
                return Ok(question);
            }
            last = Some(question);
        }
        warn!(
            "attempt cap {} exhausted without a question in range {:?}",
            max_attempts, solution_range
        );
        last.ok_or(SolverError::NoAttempts)
    }

    /// A lazy, finite, single-pass sequence of `num_questions` independent
    /// [`Solver::create_valid_question`] calls, yielding only the results
    /// whose solution count is in range. Exhausted attempts shrink the
    /// sequence instead of surfacing out-of-range questions.
    pub fn generate_set_of_valid_questions<'a>(
        &'a self,
        rng: &'a mut dyn RngCore,
        num_questions: usize,
        goal: f64,
        value_range: RangeInclusive<i64>,
        solution_range: RangeInclusive<usize>,
        max_attempts: usize,
    ) -> impl Iterator<Item = Result<Question, SolverError>> + 'a {
        (0..num_questions).filter_map(move |_| {
            let attempt = self.create_valid_question(
                &mut *rng,
                goal,
                value_range.clone(),
                solution_range.clone(),
                max_attempts,
            );
            match attempt {
                Ok(question) if solution_range.contains(&question.num_solutions()) => {
                    Some(Ok(question))
                }
                Ok(_) => None,
                Err(error) => Some(Err(error)),
            }
        })
    }

    /// Specializes the catalogue to one concrete generator tuple, keeping
    /// the first expression per distinct defined value, and returns the
    /// reduced solver.
    ///
    /// # Errors
    ///
    /// `ArityMismatch` on a wrong tuple length; propagates evaluation
    /// faults.
    pub fn generate_solver_from_values(&self, values: &[f64]) -> Result<Solver, SolverError> {
        if values.len() != self.num_values {
            return Err(SolverError::ArityMismatch {
                expected: self.num_values,
                supplied: values.len(),
            });
        }
        let mut seen: HashSet<u64> = HashSet::new();
        let mut kept = Vec::new();
        for expression in &self.catalogue {
            if let Some(value) = expression.evaluate_with(values)? {
                if seen.insert(value_key(value)) {
                    kept.push(expression.clone());
                }
            }
        }
        info!(
            "reduced catalogue: {} of {} expressions kept for {:?}",
            kept.len(),
            self.catalogue.len(),
            values
        );
        Ok(Solver {
            catalogue: ExpressionList::from_expressions(
                kept,
                self.num_values,
                self.catalogue.rounding(),
                true,
            ),
            num_values: self.num_values,
        })
    }
}
