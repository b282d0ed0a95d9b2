/// The evaluator module walks AST nodes and computes numbers.
///
/// The evaluator resolves every name against a fixed namespace, performs the
/// arithmetic and reports typed errors for unknown names, forbidden access,
/// arity mismatches and numeric failures. It never falls back to any state
/// outside the namespace.
///
/// # Responsibilities
/// - Evaluates AST nodes to a single finite number.
/// - Evaluates parameter lists to an ordered name → number mapping.
/// - Reports runtime errors such as division by zero or domain errors.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each tagged
/// with its byte offset. Characters outside the grammar are rejected here.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source offsets.
/// - Handles numeric literals, identifiers and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The namespace module defines what names an expression may use.
///
/// It holds the builtin table, the numeric constants and the module
/// surrogates. A namespace is immutable once built.
pub mod namespace;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST restricted to the safe arithmetic grammar. It performs no name
/// resolution.
///
/// # Responsibilities
/// - Converts tokens into expression nodes or parameter lists.
/// - Validates grammar and syntax, reporting errors with their offset.
/// - Rejects duplicate names in parameter lists.
pub mod parser;
