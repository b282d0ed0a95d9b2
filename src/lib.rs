//! # scenegen
//!
//! scenegen turns user-typed text into trustworthy numbers and structured
//! placements for granular simulation scenes. It evaluates arithmetic and
//! `name = value` parameter lists against a closed, allow-listed namespace,
//! and it generates placement records (circular, spiral, linear and grid
//! loops, granulometric populations with optional packing) from already
//! evaluated parameters.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ExpressionError,
    interpreter::{
        evaluator::{Evaluator, Parameters},
        parser::core::ParseResult,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of an expression as a tree. The AST is built by the
/// parser and traversed by the evaluator. Every node carries the byte offset
/// it was parsed from, for error reporting.
pub mod ast;
/// Provides typed errors for parsing, evaluation and generation.
///
/// # Responsibilities
/// - Defines one error enum per phase (parser, evaluator, generator).
/// - Attaches byte offsets and offending names for context.
/// - Wraps parse and evaluation failures for one-call entry points.
pub mod error;
/// Turns validated numbers into placement records.
///
/// Generator kinds form a closed tagged union; the engine dispatches on the
/// kind and every kind is a pure function of its spec and a template
/// resolver. Granulometric sampling takes an explicit seed.
pub mod generator;
/// Parses and evaluates expressions.
///
/// This module ties together lexing, parsing, the fixed namespace and the
/// evaluator.
///
/// # Responsibilities
/// - Restricts the accepted text to a closed arithmetic grammar.
/// - Resolves every name against an immutable allow-list.
/// - Provides entry points for single expressions and parameter lists.
pub mod interpreter;
/// General utilities for lossless numeric conversion.
pub mod util;

/// Parses `source` into an expression tree without evaluating it.
///
/// # Example
/// ```
/// use scenegen::parse;
///
/// assert!(parse("2 * math.pi * 0.5").is_ok());
/// assert!(parse("__import__('os')").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<ast::Expr> {
    interpreter::parser::parse(source)
}

/// Parses and evaluates a single expression against the standard namespace.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use scenegen::{
///     error::{EvalError, ExpressionError},
///     evaluate,
/// };
///
/// let value = evaluate("2 * math.pi * 0.5").unwrap();
/// assert!((value - std::f64::consts::PI).abs() < 1e-12);
///
/// let err = evaluate("1 / 0").unwrap_err();
/// assert!(matches!(err, ExpressionError::Eval(EvalError::DivisionByZero { .. })));
/// ```
pub fn evaluate(source: &str) -> Result<f64, ExpressionError> {
    Evaluator::standard().evaluate_text(source)
}

/// Parses and evaluates a `name = expression, ...` list against the standard
/// namespace.
///
/// # Errors
/// Returns an error if parsing fails, a name repeats, or any right-hand side
/// fails to evaluate to a finite number.
///
/// # Examples
/// ```
/// use scenegen::evaluate_parameter_list;
///
/// let params = evaluate_parameter_list("young=2.1e11, nu=0.3").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("young"), Some(2.1e11));
///
/// assert!(evaluate_parameter_list("").unwrap().is_empty());
/// ```
pub fn evaluate_parameter_list(source: &str) -> Result<Parameters, ExpressionError> {
    Evaluator::standard().evaluate_parameter_list(source)
}
