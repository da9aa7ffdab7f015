use std::fmt;

use crate::expression::ast::{Expression, Notation, Operand, Token};

const DECIMAL_PLACES: usize = 3;

/// Integral values render without a decimal point, everything else with a
/// fixed number of places.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.*}", DECIMAL_PLACES, value)
    }
}

fn write_token(f: &mut fmt::Formatter, token: &Token) -> fmt::Result {
    match token {
        Token::Operand(Operand::Placeholder(i)) => write!(f, "{}", i),
        Token::Operand(Operand::Number(n)) => write!(f, "{}", format_number(*n)),
        Token::Operator(op) => write!(f, "{}", op.symbol()),
        Token::LParen => write!(f, "("),
        Token::RParen => write!(f, ")"),
    }
}

/// Renders as fully-parenthesized text regardless of the stored notation,
/// e.g. `((0+1)*(2-3))`. Placeholders print as their indices.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.notation() {
            Notation::Parenthesized => {
                for token in self.tokens() {
                    write_token(f, token)?;
                }
                Ok(())
            }
            Notation::Postfix => {
                let parenthetical = self.to_parenthetical().map_err(|_| fmt::Error)?;
                for token in parenthetical.tokens() {
                    write_token(f, token)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::format_number;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.500");
        assert_eq!(format_number(1.0 / 3.0), "0.333");
    }
}
