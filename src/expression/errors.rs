use thiserror::Error;

/// Structural parse faults and contract violations.
///
/// Domain faults (division by zero, operators over an already-undefined
/// operand) are not errors; they surface as an `Ok(None)` evaluation result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("empty token sequence")]
    Empty,
    #[error("operator with fewer than two preceding operands")]
    MissingOperands,
    #[error("expression leaves {0} values unreduced")]
    UnreducedOperands(usize),
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),
    #[error("trailing tokens after a complete expression")]
    TrailingTokens,
    #[error("placeholder {index} outside the {supplied} supplied operands")]
    UnboundPlaceholder { index: usize, supplied: usize },
    #[error("expected {expected} operands, but got {supplied}")]
    ArityMismatch { expected: usize, supplied: usize },
    #[error("operation requires a generic expression")]
    NotGeneric,
    #[error("operation requires postfix notation")]
    ExpectedPostfix,
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(char),
    #[error("unparsable number literal '{0}'")]
    BadNumber(String),
}
