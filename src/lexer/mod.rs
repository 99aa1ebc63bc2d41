/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Root module for the regex-rule lexer.
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

/// Token and token-kind definitions.
pub mod token;

/// The rule-table driven scanner.
#[allow(clippy::module_inception)]
pub mod lexer;

/// Built-in rule tables for each grammar.
pub mod rules;

pub use lexer::{tokenize, Lexer, LexerConfig, Rule};
pub use token::{Token, TokenKind};
