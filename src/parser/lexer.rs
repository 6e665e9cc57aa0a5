//! Lexer for coordinate strings using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Both bracket conventions normalize to the same delimiters
    #[token("(")]
    #[token("[")]
    Open,
    #[token(")")]
    #[token("]")]
    Close,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok().filter(|v| v.is_finite()))]
    Number(f64),

    /// Any run of input the lexer could not recognize
    Invalid(String),
}

/// Lex input string into tokens with spans
///
/// Unrecognized input is kept as [`Token::Invalid`] so the grammar can reject
/// it instead of silently skipping it.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(t) => (t, span),
        Err(()) => (Token::Invalid(input[span.clone()].to_string()), span),
    })
}
