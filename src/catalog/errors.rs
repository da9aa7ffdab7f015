use thiserror::Error;

use crate::expression::ExpressionError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalogue I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalogue line {line}")]
    BadLine { line: usize },
    #[error("expression error: {0}")]
    Expression(#[from] ExpressionError),
    #[error("operation requires a generic expression list")]
    NotGeneric,
    #[error("operation requires a concrete expression list")]
    NotConcrete,
}
