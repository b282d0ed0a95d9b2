use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_additive,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Placeholder offset for errors raised when the token stream runs dry.
///
/// The recursive descent functions only see tokens, not the source text, so
/// they report this marker and the entry points replace it with the source
/// length.
pub(crate) const END_OF_INPUT: usize = usize::MAX;

/// Deepest expression tree the parser builds.
///
/// Every parenthesis, prefix operator, exponent and chained binary operator
/// adds one level. Parsing and evaluation both recurse once per level, so the
/// limit bounds stack use for any input text.
pub const MAX_NESTING: usize = 256;

/// Parses a single arithmetic expression.
///
/// This is the entry point for expression parsing. The whole input must form
/// one expression; trailing tokens are rejected.
///
/// # Errors
/// Returns [`ParseError::Syntax`] with the byte offset of the first token (or
/// character) that does not fit the grammar.
///
/// # Example
/// ```
/// use scenegen::{ast::Expr, interpreter::parser::parse};
///
/// let expr = parse("2 * math.pi * 0.5").unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { .. }));
///
/// assert!(parse("2 +").is_err());
/// assert!(parse("'rm -rf'").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_expression(&mut iter, 0).map_err(|e| locate_end(e, source))?;
    expect_end(&mut iter)?;

    Ok(expr)
}

/// Parses a full expression.
///
/// It begins at the lowest-precedence level, addition, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
/// - `depth`: Nesting level of the expression, `0` at top level.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, depth)
}

/// Steps one level deeper, failing once [`MAX_NESTING`] is reached.
///
/// The error points at the next token, or at the end of input.
pub(crate) fn nest<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if depth >= MAX_NESTING {
        let offset = tokens.peek().map_or(END_OF_INPUT, |(_, offset)| *offset);
        return Err(ParseError::syntax(offset, "Expression nested too deeply"));
    }
    Ok(depth + 1)
}

/// Fails if any token remains after a complete parse.
pub(crate) fn expect_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        None => Ok(()),
        Some((tok, offset)) => {
            Err(ParseError::syntax(*offset,
                                   format!("Extra tokens after expression, found {}",
                                           tok.describe())))
        },
    }
}

/// Builds the error reported when input ends in the middle of a construct.
pub(crate) fn unexpected_end() -> ParseError {
    ParseError::syntax(END_OF_INPUT, "Unexpected end of input")
}

/// Replaces the end-of-input marker with the length of `source`.
pub(crate) fn locate_end(error: ParseError, source: &str) -> ParseError {
    match error {
        ParseError::Syntax { offset, message } if offset == END_OF_INPUT => {
            ParseError::Syntax { offset: source.len(),
                                 message }
        },
        other => other,
    }
}
