use std::io::{BufRead, Write};

use log::debug;
use rand::RngCore;

use crate::catalog::errors::CatalogError;
use crate::catalog::fingerprint::Fingerprint;
use crate::config::EngineConfig;
use crate::expression::{Expression, ExpressionError};

/// An ordered, append-only collection of expressions plus the deduplication
/// state that keeps them pairwise distinct.
///
/// During construction every candidate passes through [`ExpressionList::add`];
/// once the catalogue is finished the list is used read-only. The guarantee
/// is probabilistic: no two held expressions evaluate to the same value under
/// every configured fingerprint.
#[derive(Debug, Clone)]
pub struct ExpressionList {
    expressions: Vec<Expression>,
    num_values: usize,
    rounding: Option<u32>,
    generic: bool,
    fingerprints: Vec<Fingerprint>,
}

impl ExpressionList {
    /// An empty list with `num_fingerprints` freshly sampled fingerprint
    /// vectors of length `num_values`.
    pub fn new(
        num_values: usize,
        rounding: Option<u32>,
        num_fingerprints: usize,
        generic: bool,
        rng: &mut dyn RngCore,
    ) -> Self {
        let fingerprints = (0..num_fingerprints)
            .map(|_| Fingerprint::sample(num_values, rng))
            .collect();
        Self {
            expressions: Vec::new(),
            num_values,
            rounding,
            generic,
            fingerprints,
        }
    }

    /// Adopts an already-distinct set of expressions without re-running the
    /// oracle. The resulting list carries no fingerprints and accepts any
    /// further `add` unconditionally, so it is meant to be used read-only.
    pub fn from_expressions(
        expressions: Vec<Expression>,
        num_values: usize,
        rounding: Option<u32>,
        generic: bool,
    ) -> Self {
        Self {
            expressions,
            num_values,
            rounding,
            generic,
            fingerprints: Vec::new(),
        }
    }

    /// The deduplication oracle.
    ///
    /// The candidate is evaluated under every fingerprint vector. It is
    /// accepted only if each fingerprint reports the value as new or
    /// undefined; a single already-seen value classifies it as a semantic
    /// duplicate and discards it. On acceptance all defined values are
    /// recorded and the candidate is appended.
    ///
    /// This is a Monte-Carlo equivalence test, not a proof: several
    /// independent sample points make both false-new and false-duplicate
    /// classifications rare without eliminating them.
    ///
    /// # Errors
    ///
    /// Propagates evaluation faults, e.g. a fingerprint vector too short for
    /// the candidate's placeholders.
    pub fn add(&mut self, expression: Expression) -> Result<bool, ExpressionError> {
        let mut values = Vec::with_capacity(self.fingerprints.len());
        for fingerprint in &self.fingerprints {
            let value = expression.evaluate_with(fingerprint.operands())?;
            if let Some(value) = value {
                if fingerprint.contains(value) {
                    return Ok(false);
                }
            }
            values.push(value);
        }
        for (fingerprint, value) in self.fingerprints.iter_mut().zip(values) {
            if let Some(value) = value {
                fingerprint.record(value);
            }
        }
        self.expressions.push(expression);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expression> {
        self.expressions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.expressions.iter()
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn into_expressions(self) -> Vec<Expression> {
        self.expressions
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn rounding(&self) -> Option<u32> {
        self.rounding
    }

    pub fn is_generic(&self) -> bool {
        self.generic
    }

    /// Per-fingerprint seen-set sizes, for diagnostics.
    pub fn seen_counts(&self) -> Vec<usize> {
        self.fingerprints.iter().map(Fingerprint::seen_count).collect()
    }

    /// Every expression projected onto the given operand index subset.
    ///
    /// # Errors
    ///
    /// `NotGeneric` on a concrete list; propagates relabeling faults.
    pub fn relabeled(&self, indices: &[usize]) -> Result<Vec<Expression>, CatalogError> {
        if !self.generic {
            return Err(CatalogError::NotGeneric);
        }
        let relabeled = self
            .expressions
            .iter()
            .map(|expression| expression.relabel(indices))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(relabeled)
    }

    /// Instantiates a generic catalogue with concrete values, preserving
    /// order. No re-deduplication happens; equal-valued instances stay.
    ///
    /// # Errors
    ///
    /// `NotGeneric` on a concrete list; propagates substitution faults.
    pub fn substitute_all(&self, values: &[f64]) -> Result<ExpressionList, CatalogError> {
        if !self.generic {
            return Err(CatalogError::NotGeneric);
        }
        let expressions = self
            .expressions
            .iter()
            .map(|expression| expression.substitute(values))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExpressionList::from_expressions(
            expressions,
            self.num_values,
            self.rounding,
            false,
        ))
    }

    /// Cached values of a concrete list, in list order.
    ///
    /// # Errors
    ///
    /// `NotConcrete` on a generic list.
    pub fn values(&self) -> Result<Vec<Option<f64>>, CatalogError> {
        if self.generic {
            return Err(CatalogError::NotConcrete);
        }
        Ok(self.expressions.iter().map(Expression::value).collect())
    }

    /// Writes the catalogue as one expression per line, `<index>: <text>`.
    ///
    /// # Errors
    ///
    /// Propagates writer failures.
    pub fn write_catalogue<W: Write>(&self, mut writer: W) -> Result<(), CatalogError> {
        for (index, expression) in self.expressions.iter().enumerate() {
            writeln!(writer, "{}: {}", index, expression)?;
        }
        Ok(())
    }

    /// Reads a generic catalogue persisted by
    /// [`ExpressionList::write_catalogue`]. The entries are adopted as-is;
    /// the writer is trusted to have deduplicated them.
    ///
    /// # Errors
    ///
    /// I/O failures, malformed lines, and expression parse faults.
    pub fn read_catalogue<R: BufRead>(
        reader: R,
        config: &EngineConfig,
    ) -> Result<ExpressionList, CatalogError> {
        let mut expressions = Vec::new();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (_, text) = line
                .split_once(": ")
                .ok_or(CatalogError::BadLine {
                    line: line_index + 1,
                })?;
            expressions.push(Expression::parse(text, &config.ops, true, config.rounding)?);
        }
        debug!("read {} catalogue entries", expressions.len());
        Ok(ExpressionList::from_expressions(
            expressions,
            config.num_values,
            config.rounding,
            true,
        ))
    }
}

impl<'a> IntoIterator for &'a ExpressionList {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
