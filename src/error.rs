/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the DESCENT parser project.
 *
 * DESCENT is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use thiserror::Error;

use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Errors raised while configuring a lexer or scanning its input.
#[derive(Debug, Error)]
pub enum LexError {
    /// A rule table must contain at least one rule.
    #[error("lexer rule table is empty")]
    NoRules,

    /// A rule pattern failed to compile.
    #[error("invalid pattern {pattern:?} for {kind}: {source}")]
    InvalidRule {
        pattern: String,
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },

    /// A rule pattern accepts the empty string and would stall the lexer.
    #[error("pattern {pattern:?} for {kind} matches the empty string")]
    EmptyMatch { pattern: String, kind: TokenKind },

    /// A JSON rule table could not be read.
    #[error("invalid rule table: {0}")]
    Config(#[from] serde_json::Error),

    /// No rule matches the input at this position.
    #[error("unexpected character {ch:?} at {span}")]
    UnexpectedCharacter { ch: char, span: Span },
}

/// Every way a parse can fail.
///
/// Syntax failures (`UnexpectedToken`, `UnexpectedEnd`, `TrailingInput`)
/// come from the grammar's "no value" sentinel being classified once at the
/// top of `start`. The remaining variants are raised where they happen and
/// travel up with `?`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token appeared where no production accepts it.
    #[error("unexpected token {found} at {}", .found.span)]
    UnexpectedToken { found: Token },

    /// Input ended in the middle of a production.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A complete statement was recognised but tokens remain after it.
    #[error("unconsumed input starting with {found} at {}", .found.span)]
    TrailingInput { found: Token },

    /// An identifier was read before any `set` assigned it.
    #[error("identifier '{name}' not set")]
    UndefinedIdentifier { name: String, span: Span },

    /// A NUMBER literal does not fit the integer range.
    #[error("number literal {literal} is out of range")]
    InvalidNumber { literal: String, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("negative exponent {exponent}")]
    NegativeExponent { exponent: i64, span: Span },

    #[error("arithmetic overflow")]
    Overflow { span: Span },

    /// A quoted CSV field never closed.
    #[error("quoted field opened at {span} is never closed")]
    UnterminatedQuote { span: Span },

    /// Productions nested deeper than the engine allows.
    #[error("expression nested deeper than {limit} productions at {span}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Stable error code (E0001, E0002, …) shown in diagnostics and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Lex(_) => "E0001",
            ParseError::UnexpectedToken { .. } => "E0002",
            ParseError::UnexpectedEnd => "E0003",
            ParseError::TrailingInput { .. } => "E0004",
            ParseError::UndefinedIdentifier { .. } => "E0005",
            ParseError::InvalidNumber { .. } => "E0006",
            ParseError::DivisionByZero { .. } => "E0007",
            ParseError::NegativeExponent { .. } => "E0008",
            ParseError::Overflow { .. } => "E0009",
            ParseError::UnterminatedQuote { .. } => "E0010",
            ParseError::NestingTooDeep { .. } => "E0011",
        }
    }

    /// Primary source location, when one is known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(LexError::UnexpectedCharacter { span, .. }) => Some(*span),
            ParseError::Lex(_) | ParseError::UnexpectedEnd => None,
            ParseError::UnexpectedToken { found } | ParseError::TrailingInput { found } => {
                Some(found.span)
            }
            ParseError::UndefinedIdentifier { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::DivisionByZero { span }
            | ParseError::NegativeExponent { span, .. }
            | ParseError::Overflow { span }
            | ParseError::UnterminatedQuote { span }
            | ParseError::NestingTooDeep { span, .. } => Some(*span),
        }
    }

    /// Optional follow-up hint for the diagnostic printer.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::UndefinedIdentifier { .. } => {
                Some("assign it first, e.g. `set x = 10`")
            }
            ParseError::TrailingInput { .. } => Some("an input holds exactly one statement"),
            ParseError::UnterminatedQuote { .. } => Some("add the closing '\"'"),
            ParseError::NegativeExponent { .. } => {
                Some("exponents must be non-negative for integer arithmetic")
            }
            ParseError::NestingTooDeep { .. } => {
                Some("remove redundant parentheses or split the expression")
            }
            _ => None,
        }
    }

    /// Undefined identifiers are the one failure callers are expected to
    /// treat as unrecoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::UndefinedIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_converts_and_keeps_its_span() {
        let err: ParseError = LexError::UnexpectedCharacter {
            ch: '$',
            span: Span::new(1, 4),
        }
        .into();
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.code(), "E0001");
        assert_eq!(err.span(), Some(Span::new(1, 4)));
        assert!(err.to_string().contains("'$'"));
    }

    #[test]
    fn only_undefined_identifier_is_fatal() {
        let fatal = ParseError::UndefinedIdentifier {
            name: "y".into(),
            span: Span::new(1, 0),
        };
        assert!(fatal.is_fatal());
        assert_eq!(fatal.to_string(), "identifier 'y' not set");
        assert!(!ParseError::UnexpectedEnd.is_fatal());
        assert!(!ParseError::DivisionByZero { span: Span::new(1, 2) }.is_fatal());
    }

    #[test]
    fn trailing_input_names_the_token() {
        let err = ParseError::TrailingInput {
            found: Token::new(TokenKind::Number, "5", Span::new(1, 2)),
        };
        assert_eq!(err.to_string(), "unconsumed input starting with NUMBER(5) at 1:3");
    }

    #[test]
    fn nesting_limit_has_its_own_code() {
        let err = ParseError::NestingTooDeep {
            limit: 256,
            span: Span::new(1, 63),
        };
        assert_eq!(err.code(), "E0011");
        assert_eq!(err.span(), Some(Span::new(1, 63)));
        assert!(!err.is_fatal());
        assert!(err.help().is_some());
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn parse_error_is_send_sync_static() {
        _assert_send_sync_static::<ParseError>();
    }
}
