//! Error types for coordinate string parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("empty coordinate list")]
    Empty,
}

impl ParseError {
    /// Source span of the error, if it points into the input
    pub fn span(&self) -> Option<&Span> {
        match self {
            ParseError::Syntax { span, .. } => Some(span),
            ParseError::Empty => None,
        }
    }

    /// Shift the span by `offset` bytes, used when a ring is parsed out of a
    /// larger holes string.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + offset..span.end + offset,
                message,
                expected,
            },
            other => other,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let (span, message, expected) = match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => (span.clone(), message.clone(), expected.as_slice()),
            ParseError::Empty => (0..source.len(), self.to_string(), &[][..]),
        };
        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };

        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("{}{}", message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Open => "opening bracket".to_string(),
        Token::Close => "closing bracket".to_string(),
        Token::Comma => "','".to_string(),
        Token::Semicolon => "';'".to_string(),
        Token::Number(n) => format!("number {}", n),
        Token::Invalid(s) => format!("'{}'", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_moves_span() {
        let err = ParseError::Syntax {
            span: 2..4,
            message: "Unexpected 'x'".to_string(),
            expected: vec![],
        };
        assert_eq!(err.shifted(10).span(), Some(&(12..14)));
    }

    #[test]
    fn test_format_mentions_message() {
        let err = ParseError::Syntax {
            span: 3..4,
            message: "Unexpected 'x'".to_string(),
            expected: vec!["number".to_string()],
        };
        let report = err.format("(1,x)", "coords");
        assert!(report.contains("Unexpected 'x'"));
        assert!(report.contains("Expected: number"));
    }
}
