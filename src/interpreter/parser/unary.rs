use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::token_to_binary_operator,
            core::{ParseResult, nest, parse_expression, unexpected_end},
            utils::{expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (identity)
///
/// Unary operators bind looser than power, so `-2^2` parses as `-(2^2)`.
/// They are right-associative: `--x` is `-(-x)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
/// Every call is one nesting level, so parentheses, prefix runs and
/// exponent chains all stop at [`MAX_NESTING`](super::core::MAX_NESTING).
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Current nesting level.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a power-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nest(tokens, depth)?;
    let op = match tokens.peek() {
        Some((Token::Minus, offset)) => Some((UnaryOperator::Negate, *offset)),
        Some((Token::Plus, offset)) => Some((UnaryOperator::Plus, *offset)),
        _ => None,
    };

    if let Some((op, offset)) = op {
        tokens.next();
        let expr = parse_unary(tokens, depth)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  offset });
    }

    parse_power(tokens, depth)
}

/// Parses exponentiation expressions.
///
/// The right operand is parsed at unary level, which makes the operator
/// right-associative (`a ^ b ^ c` is `a ^ (b ^ c)`) and allows a signed
/// exponent (`2 ^ -1`).
///
/// The rule is: `power := postfix (("^" | "**") unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub(crate) fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix(tokens, depth)?;

    if let Some((token, offset)) = tokens.peek()
       && token_to_binary_operator(token) == Some(BinaryOperator::Pow)
    {
        tokens.next();
        let exponent = parse_unary(tokens, depth)?;
        return Ok(Expr::BinaryOp { left:   Box::new(base),
                                   op:     BinaryOperator::Pow,
                                   right:  Box::new(exponent),
                                   offset: *offset, });
    }

    Ok(base)
}

/// Parses a name with its optional member access and call.
///
/// Only one level of each is accepted, and only on a plain name:
///
/// ```text
///     name
///     name.member
///     name(args)
///     name.member(args)
/// ```
///
/// Anything that is not a name is handed to [`parse_primary`]. Chained
/// postfixes such as `a.b.c` or `f(1)(2)` are left for the caller, which
/// rejects them as trailing tokens.
///
/// Grammar:
/// ```text
///     postfix := IDENT ("." IDENT)? ("(" arguments ")")?
///              | primary
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, offset) = match tokens.peek() {
        Some((Token::Identifier(name), offset)) => (name.clone(), *offset),
        _ => return parse_primary(tokens, depth),
    };
    tokens.next();

    let mut node = if let Some((Token::Dot, _)) = tokens.peek() {
        tokens.next();
        let member = parse_identifier(tokens)?;
        Expr::Attribute { base: name,
                          name: member,
                          offset }
    } else {
        Expr::Identifier { name, offset }
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments =
            parse_comma_separated(tokens, |tokens| parse_expression(tokens, depth), &Token::RParen)?;
        node = Expr::Call { callee: Box::new(node),
                            arguments,
                            offset };
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions are numeric literals and parenthesized expressions.
/// Boolean and null literals are recognised here only to produce a clear
/// syntax error.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `depth`: Nesting level the group is parsed at.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), offset)) => Ok(Expr::Number { value:  *value,
                                                                  offset: *offset, }),
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens, depth)?;
            expect_token(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Some((Token::Literal(literal), offset)) => {
            Err(ParseError::syntax(*offset,
                                   format!("Literal '{literal}' is not supported, only numbers are")))
        },
        Some((tok, offset)) => {
            Err(ParseError::syntax(*offset, format!("Unexpected {}", tok.describe())))
        },
        None => Err(unexpected_end()),
    }
}
