/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the shared LL(1) parsing machinery.
 *
 * This module wires together:
 *   - The single-token lookahead cursor
 *   - The engine that binds a lexer to that cursor
 *   - The observer hooks used for logging and tracing
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

/// Token lookahead:
/// - advance / peek_kind / match_kind
pub mod cursor;

/// Lexer binding and result classification:
/// - `Engine`, `Grammar`
pub mod engine;

/// Production hooks:
/// - `ParseObserver`, `LogObserver`, `Tracer`
pub mod observer;

pub use cursor::TokenCursor;
pub use engine::{Engine, Grammar, MAX_DEPTH};
pub use observer::{LogObserver, ParseObserver, Production, Silent, Tracer};
