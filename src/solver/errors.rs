use thiserror::Error;

use crate::expression::ExpressionError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("expression evaluation failed: {0}")]
    Expression(#[from] ExpressionError),
    #[error("this solver is for {expected} values, but got {supplied}")]
    ArityMismatch { expected: usize, supplied: usize },
    #[error("solver requires a generic catalogue")]
    ConcreteCatalogue,
    #[error("max_attempts must be at least 1")]
    NoAttempts,
}
