//! Expression evaluation.
//!
//! The engine only depends on the [`Evaluator`] trait. The built-in
//! [`ExpressionEvaluator`] understands the usual calculator notation over a
//! single variable `x` (radians, case-insensitive, implicit multiplication).

mod lexer;
mod parser;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use parser::{Expr, Parser};

const CACHE_CAPACITY: usize = 64;

/// Errors reported while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression has no tokens.
    #[error("expression is empty")]
    Empty,
    /// A character that is not part of the grammar.
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    /// A malformed numeric literal.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    /// A token in a position the grammar does not allow.
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    /// The expression stops mid-construct.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// A name that is neither `x`, a constant nor a function.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
    /// A function called with the wrong number of arguments.
    #[error("{function} does not take {found} argument(s)")]
    Arity { function: &'static str, found: usize },
    /// Nesting beyond what the parser accepts.
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
    /// Division by exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The result is NaN or infinite.
    #[error("result is not a finite number: {0}")]
    NonFinite(f64),
}

/// Evaluates a real-valued expression of `x`.
pub trait Evaluator {
    /// Evaluate `expression` with the variable bound to `x`.
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, f64) -> Result<f64, EvalError>,
{
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        self(expression, x)
    }
}

/// A parsed expression ready for repeated evaluation.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    tree: Arc<Expr>,
}

impl CompiledExpression {
    /// Parse an expression.
    pub fn parse(expression: &str) -> Result<Self, EvalError> {
        let tokens = lexer::tokenize(expression)?;
        let tree = Parser::new(tokens).parse()?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Evaluate at `x`, rejecting non-finite results.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = self.tree.eval(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite(value))
        }
    }
}

/// Built-in evaluator with a small per-expression parse cache.
#[derive(Debug, Default)]
pub struct ExpressionEvaluator {
    cache: Mutex<HashMap<String, Result<CompiledExpression, EvalError>>>,
}

impl ExpressionEvaluator {
    /// Create an evaluator with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an expression, reusing a cached parse when available.
    pub fn compile(&self, expression: &str) -> Result<CompiledExpression, EvalError> {
        let Ok(mut cache) = self.cache.lock() else {
            return CompiledExpression::parse(expression);
        };
        if let Some(compiled) = cache.get(expression) {
            return compiled.clone();
        }
        let compiled = CompiledExpression::parse(expression);
        if cache.len() >= CACHE_CAPACITY {
            cache.clear();
        }
        cache.insert(expression.to_string(), compiled.clone());
        compiled
    }
}

impl Evaluator for ExpressionEvaluator {
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        self.compile(expression)?.eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_with_cache() {
        let evaluator = ExpressionEvaluator::new();
        assert_eq!(evaluator.evaluate("X^2 + 1", 3.0), Ok(10.0));
        assert_eq!(evaluator.evaluate("X^2 + 1", -1.0), Ok(2.0));
        assert_eq!(evaluator.cache.lock().expect("cache").len(), 1);
    }

    #[test]
    fn caches_parse_failures() {
        let evaluator = ExpressionEvaluator::new();
        assert!(evaluator.evaluate("sin(", 0.0).is_err());
        assert!(evaluator.evaluate("sin(", 1.0).is_err());
        assert_eq!(evaluator.cache.lock().expect("cache").len(), 1);
    }

    #[test]
    fn non_finite_results_fail() {
        let evaluator = ExpressionEvaluator::new();
        assert!(matches!(
            evaluator.evaluate("sqrt(x)", -1.0),
            Err(EvalError::NonFinite(_))
        ));
        assert!(matches!(
            evaluator.evaluate("ln(x)", 0.0),
            Err(EvalError::NonFinite(_))
        ));
    }

    #[test]
    fn closures_are_evaluators() {
        let double = |_: &str, x: f64| -> Result<f64, EvalError> { Ok(x * 2.0) };
        assert_eq!(double.evaluate("ignored", 4.0), Ok(8.0));
    }
}
