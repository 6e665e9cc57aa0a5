//! Strict coordinate grammar using chumsky
//!
//! ```text
//! list  := pairs | OPEN pairs CLOSE
//! pairs := pair (',' pair)*
//! pair  := OPEN number ',' number CLOSE
//! ```
//!
//! `OPEN` and `CLOSE` are either round or square brackets, so both the
//! `(a,b),(c,d)` and the geoJSON-style `[a,b],[c,d]` conventions parse to
//! the same result.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::lexer::Token;

/// One bracketed pair exactly as written, before axis order is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPair {
    pub first: f64,
    pub second: f64,
}

/// Parse a coordinate string into raw pairs, rejecting the whole list on any
/// malformed token.
pub fn parse_pairs(input: &str) -> Result<Vec<RawPair>, Vec<ParseError>> {
    if input.trim().is_empty() {
        return Err(vec![ParseError::Empty]);
    }

    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    list_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn list_parser<'a, I>() -> impl Parser<'a, I, Vec<RawPair>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let pair = number
        .clone()
        .then_ignore(just(Token::Comma))
        .then(number)
        .delimited_by(just(Token::Open), just(Token::Close))
        .map(|(first, second)| RawPair { first, second });

    let pairs = pair
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>();

    // A single enclosing bracket pair, as in `[[1,2],[3,4]]`, is tolerated
    let wrapped = pairs
        .clone()
        .delimited_by(just(Token::Open), just(Token::Close));

    choice((wrapped, pairs)).then_ignore(end())
}
