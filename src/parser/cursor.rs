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

use crate::error::LexError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Single-token lookahead over a `Lexer`.
///
/// The cursor holds exactly two tokens:
/// - `current`   → the token most recently consumed by `match_kind`
/// - `lookahead` → the next unconsumed token (`None` at end of input)
///
/// Tokens are pulled from the lexer one at a time, only when the lookahead
/// slot is refilled, so the input is never tokenized ahead of the grammar.
pub struct TokenCursor {
    lexer: Lexer,
    current: Option<Token>,
    lookahead: Option<Token>,
}

impl TokenCursor {
    /// Creates an empty cursor. Nothing is read until `reset` + `advance`.
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            current: None,
            lookahead: None,
        }
    }

    /// Binds new input and clears both token slots.
    pub fn reset(&mut self, input: &str) {
        self.lexer.set_input(input);
        self.current = None;
        self.lookahead = None;
    }

    /// Refills the lookahead slot from the lexer.
    ///
    /// Returns the new lookahead, or `None` once the input is exhausted.
    /// The old lookahead is dropped, so grammars must only call this to
    /// prime the cursor; consumption goes through `match_kind`.
    pub fn advance(&mut self) -> Result<Option<&Token>, LexError> {
        self.lookahead = self.lexer.next_token()?;
        Ok(self.lookahead.as_ref())
    }

    /// Kind of the lookahead token without consuming it.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|t| t.kind)
    }

    /// Consumes the lookahead if it has the expected kind.
    ///
    /// On success `current` becomes the matched token and the lookahead is
    /// refilled. On failure nothing moves. This is the only operation that
    /// consumes tokens, which keeps every grammar decision LL(1).
    pub fn match_kind(&mut self, expected: TokenKind) -> Result<bool, LexError> {
        if self.peek_kind() != Some(expected) {
            return Ok(false);
        }

        self.current = self.lookahead.take();
        self.advance()?;
        Ok(true)
    }

    /// The token most recently consumed.
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    /// True while unconsumed tokens remain.
    pub fn has_more(&self) -> bool {
        self.lookahead.is_some()
    }
}
