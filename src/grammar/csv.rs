/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     csv.rs
 * Purpose:  CSV record grammar
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
 * --------------------------------------------------------------------------
 *   record : field ( COMMA field )*
 *   field  : STRING? ( QUOTE ( COMMA | STRING )* QUOTE )?
 *
 * Quotes do not nest; inside them a comma is ordinary text.
 * ==========================================================================
 */

use crate::error::{LexError, ParseError};
use crate::lexer::TokenKind;
use crate::parser::{Engine, Grammar, LogObserver, ParseObserver, Production};

/// Parses one CSV record into its fields.
///
/// # Example
/// ```rust
/// # use descent::CsvParser;
/// let mut csv = CsvParser::new().unwrap();
/// assert_eq!(csv.parse("a,\"b,c\",d").unwrap(), vec!["a", "b,c", "d"]);
/// ```
pub struct CsvParser<O: ParseObserver = LogObserver> {
    engine: Engine<O>,
}

impl CsvParser<LogObserver> {
    /// Builds a CSV parser that logs through `LogObserver`.
    pub fn new() -> Result<Self, LexError> {
        Self::with_observer(LogObserver)
    }
}

impl<O: ParseObserver> CsvParser<O> {
    /// Builds a CSV parser; whitespace inside fields is kept.
    pub fn with_observer(observer: O) -> Result<Self, LexError> {
        Ok(Self {
            engine: Engine::with_observer(crate::lexer::rules::csv(), observer)?,
        })
    }

    /// Splits `input` into fields. Empty fields are kept and quote
    /// characters are removed.
    pub fn parse(&mut self, input: &str) -> Result<Vec<String>, ParseError> {
        let fields = self.parse_quoted(input)?;
        // STRING never holds a quote, so every '"' left is a delimiter
        Ok(fields.into_iter().map(|f| f.replace('"', "")).collect())
    }

    /// The non-empty fields joined by single spaces.
    ///
    /// # Behavior
    /// Quoted fields keep their quotes here, so `a,"b,c",d` becomes
    /// `a "b,c" d` and the field boundaries stay visible.
    pub fn parse_joined(&mut self, input: &str) -> Result<String, ParseError> {
        let fields = self.parse_quoted(input)?;
        Ok(fields
            .into_iter()
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Fields exactly as written, quotes included.
    fn parse_quoted(&mut self, input: &str) -> Result<Vec<String>, ParseError> {
        self.engine.load(input)?;
        self.record()
    }

    pub fn observer(&self) -> &O {
        self.engine.observer()
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.engine.observer_mut()
    }

    fn record(&mut self) -> Result<Vec<String>, ParseError> {
        self.traced(Production::Record, |this| {
            let mut fields = vec![this.field()?];
            while this.engine.match_kind(TokenKind::Comma)? {
                fields.push(this.field()?);
            }
            log::debug!("fields are {:?}", fields);

            this.engine.finish(Some(fields))
        })
    }

    fn field(&mut self) -> Result<String, ParseError> {
        self.traced(Production::Field, |this| {
            let mut text = String::new();

            if let Some(token) = this.engine.accept(TokenKind::String)? {
                text.push_str(&token.value);
            }

            let Some(open) = this.engine.accept(TokenKind::Quote)? else {
                return Ok(text);
            };
            text.push('"');

            loop {
                if let Some(token) = this.engine.accept(TokenKind::String)? {
                    text.push_str(&token.value);
                } else if this.engine.match_kind(TokenKind::Comma)? {
                    text.push(',');
                } else if this.engine.match_kind(TokenKind::Quote)? {
                    text.push('"');
                    return Ok(text);
                } else if let Some(found) = this.engine.lookahead() {
                    return Err(ParseError::UnexpectedToken {
                        found: found.clone(),
                    });
                } else {
                    log::error!("Improperly nested QUOTE");
                    return Err(ParseError::UnterminatedQuote { span: open.span });
                }
            }
        })
    }
}

impl<O: ParseObserver> Grammar for CsvParser<O> {
    type Observer = O;

    fn engine(&mut self) -> &mut Engine<O> {
        &mut self.engine
    }
}
