use crate::expression::ast::{Operand, Token};
use crate::expression::errors::ExpressionError;

/// Rounds to a fixed number of decimal places. Applied to final evaluation
/// results only, so that value comparisons tolerate float path noise.
pub(super) fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

fn resolve(operand: &Operand, operands: &[f64]) -> Result<f64, ExpressionError> {
    match operand {
        Operand::Number(n) => Ok(*n),
        Operand::Placeholder(i) => {
            operands
                .get(*i)
                .copied()
                .ok_or(ExpressionError::UnboundPlaceholder {
                    index: *i,
                    supplied: operands.len(),
                })
        }
    }
}

/// Value-stack evaluation of a postfix sequence: push operands, on each
/// operator pop two, apply, push the result.
///
/// An undefined partial result (`None`) propagates through the rest of the
/// walk, so malformed structure is always detected even when the value is
/// already lost.
pub(super) fn evaluate_postfix(
    tokens: &[Token],
    operands: &[f64],
) -> Result<Option<f64>, ExpressionError> {
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let mut stack: Vec<Option<f64>> = Vec::with_capacity(tokens.len() / 2 + 1);
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Operand(operand) => stack.push(Some(resolve(operand, operands)?)),
            Token::Operator(op) => {
                let b = stack.pop().ok_or(ExpressionError::MissingOperands)?;
                let a = stack.pop().ok_or(ExpressionError::MissingOperands)?;
                stack.push(match (a, b) {
                    (Some(a), Some(b)) => op.apply(a, b),
                    _ => None,
                });
            }
            Token::LParen | Token::RParen => {
                return Err(ExpressionError::UnexpectedToken(position))
            }
        }
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        (Some(_), false) => Err(ExpressionError::UnreducedOperands(stack.len() + 1)),
        (None, _) => Err(ExpressionError::Empty),
    }
}

/// Recursive-descent evaluation of a fully-parenthesized sequence.
pub(super) fn evaluate_parenthesized(
    tokens: &[Token],
    operands: &[f64],
) -> Result<Option<f64>, ExpressionError> {
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let mut position = 0;
    let value = parse_sequence(tokens, &mut position, operands)?;
    if position != tokens.len() {
        return Err(ExpressionError::TrailingTokens);
    }
    Ok(value)
}

fn parse_sequence(
    tokens: &[Token],
    position: &mut usize,
    operands: &[f64],
) -> Result<Option<f64>, ExpressionError> {
    let mut accumulated = parse_term(tokens, position, operands)?;
    while let Some(Token::Operator(op)) = tokens.get(*position) {
        *position += 1;
        let rhs = parse_term(tokens, position, operands)?;
        accumulated = match (accumulated, rhs) {
            (Some(a), Some(b)) => op.apply(a, b),
            _ => None,
        };
    }
    Ok(accumulated)
}

fn parse_term(
    tokens: &[Token],
    position: &mut usize,
    operands: &[f64],
) -> Result<Option<f64>, ExpressionError> {
    match tokens.get(*position) {
        Some(Token::LParen) => {
            *position += 1;
            let inner = parse_sequence(tokens, position, operands)?;
            match tokens.get(*position) {
                Some(Token::RParen) => {
                    *position += 1;
                    Ok(inner)
                }
                _ => Err(ExpressionError::UnbalancedParentheses),
            }
        }
        Some(Token::Operand(operand)) => {
            *position += 1;
            Ok(Some(resolve(operand, operands)?))
        }
        Some(_) => Err(ExpressionError::UnexpectedToken(*position)),
        None => Err(ExpressionError::UnbalancedParentheses),
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_567, 2), 1.23);
        assert_eq!(round_to(1.236, 2), 1.24);
        assert_eq!(round_to(-1.4, 0), -1.0);
        assert_eq!(round_to(3.000_000_000_4, 9), 3.0);
    }

    #[test]
    fn test_round_to_is_stable_on_integers() {
        assert_eq!(round_to(24.0, 9), 24.0);
        assert_eq!(round_to(-7.0, 5), -7.0);
    }
}
