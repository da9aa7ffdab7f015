use crate::expression::errors::ExpressionError;
use crate::expression::eval;
use crate::operation::Operation;

/// An operand position: either a template placeholder index or a concrete
/// number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Placeholder(usize),
    Number(f64),
}

/// One token of an expression's sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Operand(Operand),
    Operator(Operation),
    LParen,
    RParen,
}

/// The stored token form. The two notations are semantically equivalent and
/// interconvertible; they differ only in external text rendering and in which
/// evaluator walks the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Postfix,
    Parenthesized,
}

/// A well-formed binary arithmetic expression over a token sequence.
///
/// A generic expression is a template whose operand slots are placeholder
/// indices; a concrete expression carries numbers and caches its evaluation
/// result at construction. Expressions are immutable once built; every
/// transformation returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
    notation: Notation,
    generic: bool,
    rounding: Option<u32>,
    num_values: usize,
    value: Option<f64>,
}

impl Expression {
    /// Builds an expression from a postfix token sequence.
    ///
    /// Concrete expressions are evaluated once here and the result cached.
    ///
    /// # Errors
    ///
    /// Returns a parse fault for structurally malformed input, e.g. an
    /// operator with fewer than two preceding operands, or a concrete
    /// sequence that still contains placeholders.
    pub fn postfix(
        tokens: Vec<Token>,
        generic: bool,
        rounding: Option<u32>,
    ) -> Result<Self, ExpressionError> {
        Self::build(tokens, Notation::Postfix, generic, rounding)
    }

    /// Builds an expression from a fully-parenthesized token sequence.
    ///
    /// # Errors
    ///
    /// Returns a parse fault on unbalanced parentheses, trailing tokens, or
    /// any other structural malformation.
    pub fn parenthesized(
        tokens: Vec<Token>,
        generic: bool,
        rounding: Option<u32>,
    ) -> Result<Self, ExpressionError> {
        Self::build(tokens, Notation::Parenthesized, generic, rounding)
    }

    fn build(
        tokens: Vec<Token>,
        notation: Notation,
        generic: bool,
        rounding: Option<u32>,
    ) -> Result<Self, ExpressionError> {
        let num_values = tokens
            .iter()
            .filter(|token| matches!(token, Token::Operand(_)))
            .count();

        let mut expression = Self {
            tokens,
            notation,
            generic,
            rounding,
            num_values,
            value: None,
        };

        if generic {
            // A full evaluation pass over a dummy operand vector validates
            // the structure without binding the template.
            let probe = vec![1.0; expression.max_placeholder().map_or(0, |i| i + 1)];
            expression.evaluate_with(&probe)?;
        } else {
            expression.value = expression.evaluate()?;
        }
        Ok(expression)
    }

    fn max_placeholder(&self) -> Option<usize> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Operand(Operand::Placeholder(i)) => Some(*i),
                _ => None,
            })
            .max()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn is_generic(&self) -> bool {
        self.generic
    }

    /// Number of operand positions in the token sequence.
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn rounding(&self) -> Option<u32> {
        self.rounding
    }

    /// The evaluation result cached at construction. Always `None` for a
    /// generic expression; `None` for a concrete one whose evaluation is
    /// undefined.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Evaluates the expression against its own operands.
    ///
    /// # Errors
    ///
    /// Fails with `UnboundPlaceholder` on a generic expression; use
    /// [`Expression::evaluate_with`] or [`Expression::substitute`] instead.
    pub fn evaluate(&self) -> Result<Option<f64>, ExpressionError> {
        self.evaluate_with(&[])
    }

    /// Evaluates with each `Placeholder(i)` resolved to `operands[i]`.
    ///
    /// Concrete expressions ignore `operands`. Undefined results propagate as
    /// `Ok(None)` without interrupting the walk.
    ///
    /// # Errors
    ///
    /// Returns a parse fault for malformed sequences and
    /// `UnboundPlaceholder` when a placeholder index is not covered.
    pub fn evaluate_with(&self, operands: &[f64]) -> Result<Option<f64>, ExpressionError> {
        let raw = match self.notation {
            Notation::Postfix => eval::evaluate_postfix(&self.tokens, operands)?,
            Notation::Parenthesized => eval::evaluate_parenthesized(&self.tokens, operands)?,
        };
        Ok(raw.map(|value| match self.rounding {
            Some(digits) => eval::round_to(value, digits),
            None => value,
        }))
    }

    /// Replaces each placeholder with the corresponding concrete value,
    /// returning a new concrete expression that shares the operator
    /// structure.
    ///
    /// # Errors
    ///
    /// `NotGeneric` on a concrete receiver; `ArityMismatch` when
    /// `values.len()` differs from the template's operand count.
    pub fn substitute(&self, values: &[f64]) -> Result<Expression, ExpressionError> {
        if !self.generic {
            return Err(ExpressionError::NotGeneric);
        }
        if values.len() != self.num_values {
            return Err(ExpressionError::ArityMismatch {
                expected: self.num_values,
                supplied: values.len(),
            });
        }
        let tokens = self
            .tokens
            .iter()
            .map(|token| match token {
                Token::Operand(Operand::Placeholder(i)) => values
                    .get(*i)
                    .map(|value| Token::Operand(Operand::Number(*value)))
                    .ok_or(ExpressionError::UnboundPlaceholder {
                        index: *i,
                        supplied: values.len(),
                    }),
                other => Ok(*other),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(tokens, self.notation, false, self.rounding)
    }

    /// Maps each `Placeholder(j)` to `Placeholder(indices[j])`, projecting a
    /// canonical template onto an arbitrary operand index subset. The result
    /// stays generic.
    ///
    /// # Errors
    ///
    /// Same contract as [`Expression::substitute`].
    pub fn relabel(&self, indices: &[usize]) -> Result<Expression, ExpressionError> {
        if !self.generic {
            return Err(ExpressionError::NotGeneric);
        }
        if indices.len() != self.num_values {
            return Err(ExpressionError::ArityMismatch {
                expected: self.num_values,
                supplied: indices.len(),
            });
        }
        let tokens = self
            .tokens
            .iter()
            .map(|token| match token {
                Token::Operand(Operand::Placeholder(j)) => indices
                    .get(*j)
                    .map(|index| Token::Operand(Operand::Placeholder(*index)))
                    .ok_or(ExpressionError::UnboundPlaceholder {
                        index: *j,
                        supplied: indices.len(),
                    }),
                other => Ok(*other),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(tokens, self.notation, true, self.rounding)
    }

    /// Joins two postfix expressions under `op`: `left right op`.
    ///
    /// # Errors
    ///
    /// `ExpectedPostfix` unless both inputs are in postfix notation.
    pub fn combine(
        left: &Expression,
        right: &Expression,
        op: Operation,
    ) -> Result<Expression, ExpressionError> {
        if left.notation != Notation::Postfix || right.notation != Notation::Postfix {
            return Err(ExpressionError::ExpectedPostfix);
        }
        let mut tokens = Vec::with_capacity(left.tokens.len() + right.tokens.len() + 1);
        tokens.extend_from_slice(&left.tokens);
        tokens.extend_from_slice(&right.tokens);
        tokens.push(Token::Operator(op));
        Self::build(tokens, Notation::Postfix, left.generic, left.rounding)
    }

    /// Every candidate joining `self` and `other`: one per commutative
    /// operator, both argument orders per non-commutative operator.
    ///
    /// # Errors
    ///
    /// Propagates [`Expression::combine`] faults.
    pub fn combined_with(
        &self,
        other: &Expression,
        ops: &[Operation],
    ) -> Result<Vec<Expression>, ExpressionError> {
        let mut combined = Vec::with_capacity(ops.len() * 2);
        for op in ops {
            combined.push(Expression::combine(self, other, *op)?);
            if !op.is_commutative() {
                combined.push(Expression::combine(other, self, *op)?);
            }
        }
        Ok(combined)
    }

    /// Converts a postfix expression to fully-parenthesized form in a single
    /// stack pass. A parenthesized expression is returned unchanged.
    ///
    /// # Errors
    ///
    /// `MissingOperands` is unreachable for expressions built through the
    /// public constructors but reported rather than panicking.
    pub fn to_parenthetical(&self) -> Result<Expression, ExpressionError> {
        if self.notation == Notation::Parenthesized {
            return Ok(self.clone());
        }
        let mut stack: Vec<Vec<Token>> = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Operand(_) => stack.push(vec![*token]),
                Token::Operator(_) => {
                    let right = stack.pop().ok_or(ExpressionError::MissingOperands)?;
                    let left = stack.pop().ok_or(ExpressionError::MissingOperands)?;
                    let mut wrapped = Vec::with_capacity(left.len() + right.len() + 3);
                    wrapped.push(Token::LParen);
                    wrapped.extend(left);
                    wrapped.push(*token);
                    wrapped.extend(right);
                    wrapped.push(Token::RParen);
                    stack.push(wrapped);
                }
                Token::LParen | Token::RParen => return Err(ExpressionError::ExpectedPostfix),
            }
        }
        let tokens = stack.pop().ok_or(ExpressionError::Empty)?;
        if !stack.is_empty() {
            return Err(ExpressionError::UnreducedOperands(stack.len() + 1));
        }
        Ok(Expression {
            tokens,
            notation: Notation::Parenthesized,
            generic: self.generic,
            rounding: self.rounding,
            num_values: self.num_values,
            value: self.value,
        })
    }
}
