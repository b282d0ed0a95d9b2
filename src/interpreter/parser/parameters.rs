use std::collections::HashSet;

use crate::{
    ast::Parameter,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{
            core::{ParseResult, locate_end, parse_expression},
            utils::{expect_token, parse_identifier_at},
        },
    },
};

/// Parses a parameter list of the form `name1 = expr1, name2 = expr2, ...`.
///
/// Whitespace around `=` and `,` is insignificant. Each right-hand side is a
/// full expression. Blank input yields an empty list. Leading or trailing
/// commas are syntax errors.
///
/// Grammar:
/// ```text
///     parameters := (IDENT "=" expression ("," IDENT "=" expression)*)?
/// ```
///
/// # Errors
/// - [`ParseError::Syntax`] for malformed text.
/// - [`ParseError::DuplicateParameter`] when a name appears twice, pointing
///   at the second occurrence.
///
/// # Example
/// ```
/// use scenegen::{error::ParseError, interpreter::parser::parse_parameter_list};
///
/// let params = parse_parameter_list("young=2.1e11, nu=0.3").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].name, "young");
///
/// let err = parse_parameter_list("a=1, a=2").unwrap_err();
/// assert!(matches!(err, ParseError::DuplicateParameter { .. }));
/// ```
pub fn parse_parameter_list(source: &str) -> ParseResult<Vec<Parameter>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let mut parameters = Vec::new();
    let mut seen = HashSet::new();

    if iter.peek().is_none() {
        return Ok(parameters);
    }

    loop {
        let (name, offset) = parse_identifier_at(&mut iter).map_err(|e| locate_end(e, source))?;
        expect_token(&mut iter, &Token::Equals).map_err(|e| locate_end(e, source))?;
        let value = parse_expression(&mut iter, 0).map_err(|e| locate_end(e, source))?;

        if !seen.insert(name.clone()) {
            return Err(ParseError::DuplicateParameter { name, offset });
        }
        parameters.push(Parameter { name, value, offset });

        match iter.next() {
            None => break,
            Some((Token::Comma, _)) => {},
            Some((tok, offset)) => {
                return Err(ParseError::syntax(*offset,
                                              format!("Expected ',' between parameters, found {}",
                                                      tok.describe())));
            },
        }
    }

    Ok(parameters)
}
