/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the lexical token types shared by every DESCENT
 *            grammar during the lexing and parsing stages.
 *
 * Author:    Sam Wilcox
 *
 * License:
 * This file is part of the DESCENT parser project.
 *
 * DESCENT is dual-licensed under the terms of:
 *   - The MIT License
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

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::span::Span;

/// Represents the **category of a lexical token**.
///
/// `TokenKind` is the only thing a grammar inspects when it decides which
/// production to apply, so every terminal of every grammar has exactly one
/// variant here.
///
/// # Pipeline Role
/// ```text
/// Input → Lexer → TokenKind → Cursor (1 lookahead) → Grammar → Value
/// ```
///
/// End of input is **not** a kind: the lexer reports it by returning no
/// token at all, and the cursor exposes it as `None`.
///
/// Rule tables name kinds in `SCREAMING_SNAKE_CASE` (`"NUMBER"`, `"LP"`),
/// which is also how they are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// An unsigned integer literal: `42`
    Number,

    /// A variable name: `x`, `total_1`
    Identifier,

    /// `+`
    Plus,

    /// `-`
    Minus,

    /// `*`
    Multiply,

    /// `/`
    Divide,

    /// `^`, right-associative exponentiation
    Power,

    /// `(`
    Lp,

    /// `)`
    Rp,

    /// The `set` keyword that opens an assignment.
    Set,

    /// `=`
    Equals,

    /// `,` separating CSV fields
    Comma,

    /// `"` delimiting a quoted CSV field
    Quote,

    /// A run of CSV text containing neither `,` nor `"`
    String,
}

impl TokenKind {
    /// Returns the canonical rule-table name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Power => "POWER",
            TokenKind::Lp => "LP",
            TokenKind::Rp => "RP",
            TokenKind::Set => "SET",
            TokenKind::Equals => "EQUALS",
            TokenKind::Comma => "COMMA",
            TokenKind::Quote => "QUOTE",
            TokenKind::String => "STRING",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a **single lexical token** produced by the lexer.
///
/// A `Token` is immutable once produced and consists of:
/// - A token category (`TokenKind`)
/// - The exact source text that matched (`value`)
/// - The position of its first character (`span`)
///
/// # Example Tokens
/// ```text
/// set  →  { kind: SET,        value: "set", span: 1:1 }
/// x    →  { kind: IDENTIFIER, value: "x",   span: 1:5 }
/// 42   →  { kind: NUMBER,     value: "42",  span: 1:9 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The source text that produced this token, preserved verbatim for
    /// literal evaluation and error messages.
    pub value: String,

    /// Where the token starts in the input.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token for **user-facing output**.
    ///
    /// Diagnostics show what the user wrote, so only the kind and the
    /// literal text are printed:
    /// ```text
    /// NUMBER(5)
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_with_rule_table_names() {
        let json = serde_json::to_string(&TokenKind::Identifier).unwrap();
        assert_eq!(json, "\"IDENTIFIER\"");

        let kind: TokenKind = serde_json::from_str("\"LP\"").unwrap();
        assert_eq!(kind, TokenKind::Lp);
    }

    #[test]
    fn display_shows_kind_and_text() {
        let token = Token::new(TokenKind::Number, "17", Span::new(1, 3));
        assert_eq!(token.to_string(), "NUMBER(17)");
    }
}
