use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, unexpected_end},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// Used for function argument lists. It repeatedly calls `parse_item` to parse
/// one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. A
/// trailing comma before the closing token is rejected.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, offset)) => {
                return Err(ParseError::syntax(*offset,
                                              format!("Expected ',' or {}, found {}",
                                                      closing.describe(),
                                                      tok.describe())));
            },
            None => return Err(unexpected_end()),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name together with its offset.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier_at<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), offset)) => Ok((s.clone(), *offset)),
        Some((tok, offset)) => {
            Err(ParseError::syntax(*offset,
                                   format!("Expected name, found {}", tok.describe())))
        },
        None => Err(unexpected_end()),
    }
}

/// Parses a plain identifier and returns its name.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_identifier_at(tokens).map(|(name, _)| name)
}

/// Consumes the next token and checks that it is `expected`.
///
/// # Errors
/// Returns a `ParseError` naming both the expected and the found token.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token)
                                                          -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, _)) if tok == expected => Ok(()),
        Some((tok, offset)) => {
            Err(ParseError::syntax(*offset,
                                   format!("Expected {}, found {}",
                                           expected.describe(),
                                           tok.describe())))
        },
        None => Err(unexpected_end()),
    }
}
