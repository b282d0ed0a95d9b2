use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, nest},
            unary::parse_unary,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// Each operator in a chain deepens the left-leaning tree by one level.
///
/// # Parameters
/// - `tokens`: Token stream with offset information.
/// - `depth`: Current nesting level.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, depth)?;
    let mut level = depth;
    loop {
        if let Some((token, offset)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            level = nest(tokens, level)?;
            let right = parse_multiplicative(tokens, level)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    offset: *offset };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with offset information.
/// - `depth`: Current nesting level.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, depth)?;
    let mut level = depth;
    loop {
        if let Some((token, offset)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            level = nest(tokens, level)?;
            let right = parse_unary(tokens, level)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    offset: *offset };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Both `^` and `**` map to [`BinaryOperator::Pow`].
///
/// # Example
/// ```
/// use scenegen::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::DoubleStar),
///            Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret | Token::DoubleStar => Some(BinaryOperator::Pow),
        _ => None,
    }
}
