/// Parsing errors.
///
/// Defines the errors that can occur while lexing and parsing expression or
/// parameter-list text. Parse errors carry the byte offset of the offending
/// input.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains every error that can be raised while walking an expression tree
/// against the namespace: unknown names, forbidden member access, arity
/// mismatches and numeric failures.
pub mod eval_error;
/// Generation errors.
///
/// Errors raised by the generator engine when a spec violates its kind's
/// preconditions or when the packing post-pass runs out of attempts.
pub mod generate_error;

pub use eval_error::EvalError;
pub use generate_error::GenerateError;
pub use parse_error::ParseError;

/// Error returned by entry points that parse and evaluate in one call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// The text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The text parsed but did not evaluate.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
