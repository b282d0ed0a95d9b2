/// Core evaluation logic.
///
/// Contains the `Evaluator`, expression dispatch, name resolution and the
/// finiteness checks applied to every intermediate result.
pub mod core;

/// Binary operator evaluation.
///
/// Implements IEEE-754 arithmetic for `+ - * / ^` with explicit division by
/// zero and domain checks.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements prefix negation and identity.
pub mod unary;

/// Function evaluation.
///
/// Resolves callees against the namespace, checks arity and dispatches to the
/// builtin implementations.
pub mod function;

/// Parameter-list evaluation.
///
/// Evaluates `name = expression` lists into an ordered mapping of finite
/// numbers.
pub mod parameters;

pub use self::{core::Evaluator, parameters::Parameters};
