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

use std::fmt;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::lexer::Token;
use crate::parser::cursor::TokenCursor;

/// Grammar rules that report to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Start,
    Assignment,
    Expr,
    Term,
    Power,
    Factor,
    Record,
    Field,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Production::Start => "start",
            Production::Assignment => "assignment",
            Production::Expr => "expr",
            Production::Term => "term",
            Production::Power => "power",
            Production::Factor => "factor",
            Production::Record => "record",
            Production::Field => "field",
        };
        f.write_str(name)
    }
}

/// Hook invoked by the engine as a grammar runs.
///
/// All methods default to doing nothing, so an observer only implements
/// the events it cares about.
pub trait ParseObserver {
    /// A production is about to run; `cursor` shows the token state on entry.
    fn enter(&mut self, _production: Production, _cursor: &TokenCursor) {}

    /// A production returned, successfully or not.
    fn exit(&mut self, _production: Production) {}

    /// `match_kind` consumed `token`.
    fn consumed(&mut self, _token: &Token) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ParseObserver for Silent {}

/// Default observer: reports token state through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn enter(&mut self, production: Production, cursor: &TokenCursor) {
        log::debug!(
            "Caller {}: current token is {}, next token is {}",
            production,
            describe(cursor.current()),
            describe(cursor.lookahead()),
        );
    }

    fn consumed(&mut self, token: &Token) {
        log::info!("Parsing token {}", token);
    }
}

fn describe(token: Option<&Token>) -> String {
    token.map_or_else(|| "<end>".to_string(), Token::to_string)
}

/// What happened at one point of a trace.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceKind {
    Enter {
        production: Production,
        lookahead: Option<Token>,
    },
    Consume(Token),
}

#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub at: DateTime<Utc>,
    pub depth: usize,
    pub kind: TraceKind,
}

/// Records every production entry and consumed token with a timestamp.
///
/// Backs the CLI `--trace` flag; the rendered form is an indented call
/// tree:
/// ```text
///      0us start  [next NUMBER(2)]
///      4us   expr  [next NUMBER(2)]
///      6us     term  [next NUMBER(2)]
/// ```
#[derive(Debug, Default)]
pub struct Tracer {
    events: Vec<TraceEvent>,
    depth: usize,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Production names in the order they were entered.
    pub fn productions(&self) -> Vec<Production> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                TraceKind::Enter { production, .. } => Some(production),
                TraceKind::Consume(_) => None,
            })
            .collect()
    }

    /// Drops recorded events so the tracer can follow the next parse.
    pub fn clear(&mut self) {
        self.events.clear();
        self.depth = 0;
    }

    /// Renders the trace as an indented tree, one event per line, with
    /// microseconds elapsed since the first event.
    pub fn render(&self) -> String {
        let Some(first) = self.events.first() else {
            return String::new();
        };

        let mut out = String::new();
        for event in &self.events {
            let elapsed = (event.at - first.at).num_microseconds().unwrap_or(i64::MAX);
            let indent = "  ".repeat(event.depth);
            let _ = match &event.kind {
                TraceKind::Enter {
                    production,
                    lookahead,
                } => writeln!(
                    out,
                    "{:>6}us {}{}  [next {}]",
                    elapsed,
                    indent,
                    production,
                    describe(lookahead.as_ref())
                ),
                TraceKind::Consume(token) => {
                    writeln!(out, "{:>6}us {}= {}", elapsed, indent, token)
                }
            };
        }
        out
    }

    fn record(&mut self, kind: TraceKind) {
        self.events.push(TraceEvent {
            at: Utc::now(),
            depth: self.depth,
            kind,
        });
    }
}

impl ParseObserver for Tracer {
    fn enter(&mut self, production: Production, cursor: &TokenCursor) {
        self.record(TraceKind::Enter {
            production,
            lookahead: cursor.lookahead().cloned(),
        });
        self.depth += 1;
    }

    fn exit(&mut self, _production: Production) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn consumed(&mut self, token: &Token) {
        self.record(TraceKind::Consume(token.clone()));
    }
}
