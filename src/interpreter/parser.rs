/// Parser entry points and shared parser types.
///
/// Contains the `parse` entry point for single expressions, the
/// `ParseResult` alias and end-of-input handling.
pub mod core;

/// Unary operators, power, postfix and primary expressions.
///
/// Handles prefix `-`/`+`, right-associative `^`/`**`, one level of member
/// access or call on a name, literals and parenthesized groups.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative levels.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides comma-separated list parsing and token expectations shared by the
/// other parser modules.
pub mod utils;

/// Parameter-list mode.
///
/// Parses `name = expression, name = expression` text and rejects duplicate
/// names.
pub mod parameters;

pub use self::{core::parse, parameters::parse_parameter_list};
