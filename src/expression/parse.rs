use log::debug;

use crate::expression::ast::{Expression, Operand, Token};
use crate::expression::errors::ExpressionError;
use crate::operation::Operation;

fn lex_literal(literal: &str, generic: bool) -> Result<Token, ExpressionError> {
    let operand = if generic {
        let index = literal
            .parse::<usize>()
            .map_err(|_| ExpressionError::BadNumber(literal.to_string()))?;
        Operand::Placeholder(index)
    } else {
        let number = literal
            .parse::<f64>()
            .map_err(|_| ExpressionError::BadNumber(literal.to_string()))?;
        Operand::Number(number)
    };
    Ok(Token::Operand(operand))
}

impl Expression {
    /// Parses a fully-parenthesized rendering, e.g. `((0+1)*(2-3))`, back
    /// into an expression. The inverse of [`Expression`]'s `Display` output
    /// for the catalogue persistence format.
    ///
    /// With `generic` set, number literals are read as placeholder indices.
    ///
    /// # Errors
    ///
    /// Returns a parse fault for unknown symbols, unparsable literals, or
    /// any structural malformation (unbalanced parentheses, trailing text).
    pub fn parse(
        text: &str,
        ops: &[Operation],
        generic: bool,
        rounding: Option<u32>,
    ) -> Result<Self, ExpressionError> {
        debug!("parsing expression text '{}'", text);

        let mut tokens = Vec::new();
        let mut literal = String::new();
        for c in text.chars() {
            if c == '(' || c == ')' || ops.iter().any(|op| op.symbol() == c) {
                if !literal.is_empty() {
                    tokens.push(lex_literal(&literal, generic)?);
                    literal.clear();
                }
                match c {
                    '(' => tokens.push(Token::LParen),
                    ')' => tokens.push(Token::RParen),
                    symbol => {
                        let op = ops
                            .iter()
                            .find(|op| op.symbol() == symbol)
                            .ok_or(ExpressionError::UnknownSymbol(symbol))?;
                        tokens.push(Token::Operator(*op));
                    }
                }
            } else if c.is_ascii_digit() || c == '.' {
                literal.push(c);
            } else if c.is_whitespace() {
                if !literal.is_empty() {
                    tokens.push(lex_literal(&literal, generic)?);
                    literal.clear();
                }
            } else {
                return Err(ExpressionError::UnknownSymbol(c));
            }
        }
        if !literal.is_empty() {
            tokens.push(lex_literal(&literal, generic)?);
        }

        Self::parenthesized(tokens, generic, rounding)
    }
}
