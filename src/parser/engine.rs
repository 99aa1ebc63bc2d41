/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * Core LL(1) Engine
 *
 * This file defines the `Engine` that every grammar drives: it binds a
 * lexer to a single-token lookahead cursor and reports progress to a
 * pluggable observer.
 *
 * The grammars themselves live in `crate::grammar`:
 * - `calc.rs`   → precedence-correct calculator
 * - `naive.rs`  → right-recursive calculator
 * - `csv.rs`    → CSV record grammar
 *
 * --------------------------------------------------------------------------
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

use crate::error::{LexError, ParseError};
use crate::lexer::{Lexer, LexerConfig, Token, TokenKind};
use crate::parser::cursor::TokenCursor;
use crate::parser::observer::{LogObserver, ParseObserver, Production};
use crate::span::Span;

/// The generic LL(1) parsing engine.
///
/// This structure owns:
/// - The token cursor (and through it, the lexer)
/// - The observer notified on production entry/exit and token consumption
///
/// The grammar logic is implemented on top of it by the types in
/// `crate::grammar`, through the `Grammar` trait.
pub struct Engine<O: ParseObserver = LogObserver> {
    cursor: TokenCursor,
    observer: O,

    /// Productions currently open; bounded by `MAX_DEPTH`.
    depth: usize,
}

/// Deepest production nesting a grammar may reach.
///
/// Every production is a native call, so input such as a thousand nested
/// parentheses would otherwise exhaust the stack. One parenthesised group
/// costs the calculator four levels (`factor → expr → term → power`).
pub const MAX_DEPTH: usize = 256;

impl Engine<LogObserver> {
    /// Builds an engine with the default logging observer.
    pub fn new(config: LexerConfig) -> Result<Self, LexError> {
        Self::with_observer(config, LogObserver)
    }
}

impl<O: ParseObserver> Engine<O> {
    /// Compiles `config` into a lexer and wraps it in an empty cursor.
    ///
    /// # Arguments
    /// - `config`   → ordered rule table for the grammar's terminals
    /// - `observer` → notified as productions run and tokens are consumed
    pub fn with_observer(config: LexerConfig, observer: O) -> Result<Self, LexError> {
        Ok(Self {
            cursor: TokenCursor::new(Lexer::new(config)?),
            observer,
            depth: 0,
        })
    }

    /// Binds `input` and primes the cursor with its first token.
    pub fn load(&mut self, input: &str) -> Result<(), ParseError> {
        log::debug!("input is {:?}", input);
        self.cursor.reset(input);
        self.depth = 0;
        self.cursor.advance()?;
        Ok(())
    }

    /// Consumes the lookahead if it has kind `expected`, notifying the
    /// observer of the consumed token.
    pub fn match_kind(&mut self, expected: TokenKind) -> Result<bool, ParseError> {
        if !self.cursor.match_kind(expected)? {
            return Ok(false);
        }

        if let Some(token) = self.cursor.current() {
            self.observer.consumed(token);
        }
        Ok(true)
    }

    /// `match_kind` that hands back a copy of the consumed token.
    pub fn accept(&mut self, expected: TokenKind) -> Result<Option<Token>, ParseError> {
        if self.match_kind(expected)? {
            Ok(self.cursor.current().cloned())
        } else {
            Ok(None)
        }
    }

    /// Kind of the next unconsumed token, `None` at end of input.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.cursor.peek_kind()
    }

    /// The token consumed by the last successful `match_kind`.
    pub fn current(&self) -> Option<&Token> {
        self.cursor.current()
    }

    /// The next unconsumed token.
    pub fn lookahead(&self) -> Option<&Token> {
        self.cursor.lookahead()
    }

    /// Opens `production`.
    ///
    /// # Behavior
    /// - Past `MAX_DEPTH` open productions → `NestingTooDeep` at the
    ///   lookahead, and the production is not opened
    /// - Otherwise the observer sees the entry with the current token state
    pub fn enter(&mut self, production: Production) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            let span = self
                .cursor
                .lookahead()
                .or(self.cursor.current())
                .map_or_else(Span::default, |t| t.span);
            log::error!("{} nested too deep at {}", production, span);
            return Err(ParseError::NestingTooDeep {
                limit: MAX_DEPTH,
                span,
            });
        }

        self.depth += 1;
        self.observer.enter(production, &self.cursor);
        Ok(())
    }

    /// Closes a production opened by `enter`.
    pub fn exit(&mut self, production: Production) {
        self.depth = self.depth.saturating_sub(1);
        self.observer.exit(production);
    }

    /// Number of productions currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Turns the outcome of a top-level production into the final result.
    ///
    /// # Behavior
    /// - value and no leftover tokens → `Ok(value)`
    /// - value but tokens remain      → `TrailingInput`
    /// - no value, tokens remain      → `UnexpectedToken` (the lookahead)
    /// - no value, input exhausted    → `UnexpectedEnd`
    pub fn finish<T>(&self, result: Option<T>) -> Result<T, ParseError> {
        match (result, self.cursor.lookahead()) {
            (Some(value), None) => Ok(value),
            (Some(_), Some(found)) => {
                log::debug!("parsing not complete, still have {}", found);
                Err(ParseError::TrailingInput {
                    found: found.clone(),
                })
            }
            (None, Some(found)) => Err(ParseError::UnexpectedToken {
                found: found.clone(),
            }),
            (None, None) => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// A grammar built on an `Engine`.
///
/// Implementors only expose their engine; `traced` then wraps each
/// production so observers see entry and exit without the grammar code
/// having to call them.
pub trait Grammar {
    type Observer: ParseObserver;

    fn engine(&mut self) -> &mut Engine<Self::Observer>;

    /// Runs `body` as `production`, bracketing it with observer events.
    fn traced<T, F>(&mut self, production: Production, body: F) -> Result<T, ParseError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        self.engine().enter(production)?;
        let result = body(self);
        self.engine().exit(production);
        result
    }
}
