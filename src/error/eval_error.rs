use thiserror::Error;

/// Represents all errors that can occur while evaluating an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A name does not resolve in the namespace.
    #[error("Error at offset {offset}: Unknown name '{name}'.")]
    UnknownName {
        /// The unresolved name.
        name:   String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// Member access, call or value use outside the allow-list.
    #[error("Error at offset {offset}: Access to '{target}' is not allowed.")]
    ForbiddenAccess {
        /// The name or `base.member` path that was refused.
        target: String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// A function received the wrong number of arguments.
    #[error("Error at offset {offset}: Function '{name}' expects {expected} argument(s), found {found}.")]
    Arity {
        /// Function name.
        name:     String,
        /// Accepted argument counts, rendered for display.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// Byte offset in the source text.
        offset:   usize,
    },
    /// Division (or a negative power) of zero.
    #[error("Error at offset {offset}: Division by zero in '{operation}'.")]
    DivisionByZero {
        /// The operator or function that divided by zero.
        operation: String,
        /// Byte offset in the source text.
        offset:    usize,
    },
    /// A function or operator was applied outside its real domain.
    #[error("Error at offset {offset}: Argument outside the domain of '{operation}'.")]
    Domain {
        /// The operator or function.
        operation: String,
        /// Byte offset in the source text.
        offset:    usize,
    },
    /// A result is not a finite real number.
    #[error("Error at offset {offset}: '{name}' does not evaluate to a finite number.")]
    InvalidNumber {
        /// The parameter, operator or function whose value is not finite.
        name:   String,
        /// Byte offset in the source text.
        offset: usize,
    },
}

impl EvalError {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownName { offset, .. }
            | Self::ForbiddenAccess { offset, .. }
            | Self::Arity { offset, .. }
            | Self::DivisionByZero { offset, .. }
            | Self::Domain { offset, .. }
            | Self::InvalidNumber { offset, .. } => *offset,
        }
    }
}
