/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * Hand-written LL(1) recursive-descent parsers sharing one engine:
 *
 *  - lexer/        → regex-rule tokenizer and rule tables
 *  - parser/       → single-token lookahead cursor, engine, observers
 *  - grammar/      → precedence calculator, naive calculator, CSV
 *  - environment   → variables assigned with `set`
 *  - error         → typed lexer and parser failures
 *  - diagnostics   → caret-style error rendering
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
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

pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod span;

pub use diagnostics::DiagnosticPrinter;
pub use environment::Environment;
pub use error::{LexError, ParseError};
pub use grammar::{Calculator, CsvParser, NaiveCalculator};
pub use lexer::{Lexer, LexerConfig, Rule, Token, TokenKind};
pub use parser::{LogObserver, ParseObserver, Production, Silent, Tracer};
pub use span::Span;
