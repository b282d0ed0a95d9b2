use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines every token the safe expression grammar recognises;
/// anything else is a lexical error.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `42` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Boolean and null literals. They are lexed only so the parser can
    /// reject them with a precise message.
    #[token("True", |lex| lex.slice().to_string())]
    #[token("False", |lex| lex.slice().to_string())]
    #[token("true", |lex| lex.slice().to_string())]
    #[token("false", |lex| lex.slice().to_string())]
    #[token("None", |lex| lex.slice().to_string())]
    Literal(String),
    /// Identifier tokens; names such as `pi`, `sqrt` or `young`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`
    #[token("=")]
    Equals,
}

impl Token {
    /// Short description used in parse error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Literal(l) => format!("literal '{l}'"),
            Self::Identifier(name) => format!("name '{name}'"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::DoubleStar => "'**'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Dot => "'.'".to_string(),
            Self::Equals => "'='".to_string(),
        }
    }
}

/// Splits source text into `(Token, byte offset)` pairs.
///
/// # Errors
/// Returns [`ParseError::Syntax`] at the offset of the first character that
/// does not start a valid token (quotes, brackets, `%`, comparison operators,
/// non-ASCII text, ...).
///
/// # Example
/// ```
/// use scenegen::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 * pi").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(2.0), 0),
///                 (Token::Star, 2),
///                 (Token::Identifier("pi".to_string()), 4)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        if let Ok(tok) = token {
            tokens.push((tok, offset));
        } else {
            return Err(ParseError::syntax(offset,
                                          format!("Unexpected character(s) '{}'",
                                                  lexer.slice())));
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if it is finite.
/// - `None`: If the slice is not a valid float or overflows to infinity
///   (`1e999`), which turns into a lexical error.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice()
       .parse::<f64>()
       .ok()
       .filter(|value| value.is_finite())
}
