/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     naive.rs
 * Purpose:  Right-recursive calculator grammar
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
 * The textbook BNF:
 *
 *   stmt   : "set" IDENTIFIER "=" expr | expr
 *   expr   : term "+" expr | term "-" expr | term
 *   term   : factor "*" term | factor "/" term | factor
 *   factor : IDENTIFIER | NUMBER | "(" expr ")"
 *
 * Precedence is right, associativity is not: every binary rule recurses on
 * its right operand, so `6-5-5` evaluates as `6-(5-5)` = 6 and `8/4/2` as
 * `8/(4/2)` = 4. Kept as the contrast case for `Calculator`.
 * ==========================================================================
 */

use crate::environment::Environment;
use crate::error::{LexError, ParseError};
use crate::grammar::arith;
use crate::lexer::{rules, TokenKind};
use crate::parser::{Engine, Grammar, LogObserver, ParseObserver, Production};

/// The textbook right-recursive calculator.
///
/// Shares the engine, rule table shape and environment semantics of
/// `Calculator`, but every binary rule recurses on its right operand, so
/// same-precedence chains group the wrong way.
///
/// # Example
/// ```rust
/// # use descent::NaiveCalculator;
/// let mut naive = NaiveCalculator::new().unwrap();
/// assert_eq!(naive.parse("6-5-5").unwrap(), 6);
/// ```
pub struct NaiveCalculator<O: ParseObserver = LogObserver> {
    engine: Engine<O>,
    env: Environment,
}

impl NaiveCalculator<LogObserver> {
    /// Builds a naive calculator that logs through `LogObserver`.
    pub fn new() -> Result<Self, LexError> {
        Self::with_observer(LogObserver)
    }
}

impl<O: ParseObserver> NaiveCalculator<O> {
    /// Builds a naive calculator over the rule table without `^`.
    ///
    /// # Arguments
    /// - `observer` → receives production entry/exit and consumed tokens
    pub fn with_observer(observer: O) -> Result<Self, LexError> {
        Ok(Self {
            engine: Engine::with_observer(rules::naive_calculator(), observer)?,
            env: Environment::new(),
        })
    }

    /// Parses and evaluates one statement.
    ///
    /// # Behavior
    /// - `a-b-c` evaluates as `a-(b-c)`
    /// - `set` assignments persist across calls, as in `Calculator`
    pub fn parse(&mut self, input: &str) -> Result<i64, ParseError> {
        self.engine.load(input)?;
        self.start()
    }

    /// Variables assigned so far by `set`.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn observer(&self) -> &O {
        self.engine.observer()
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.engine.observer_mut()
    }

    fn start(&mut self) -> Result<i64, ParseError> {
        self.traced(Production::Start, |this| {
            let result = if this.engine.match_kind(TokenKind::Set)? {
                this.assignment()?
            } else {
                this.expr()?
            };

            this.engine.finish(result)
        })
    }

    fn assignment(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Assignment, |this| {
            let Some(name) = this.engine.accept(TokenKind::Identifier)? else {
                return Ok(None);
            };
            if !this.engine.match_kind(TokenKind::Equals)? {
                return Ok(None);
            }
            let Some(value) = this.expr()? else {
                return Ok(None);
            };

            this.env.set(name.value, value);
            Ok(Some(value))
        })
    }

    fn expr(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Expr, |this| {
            let Some(lhs) = this.term()? else {
                return Ok(None);
            };

            if let Some(op) = this.engine.accept(TokenKind::Plus)? {
                let Some(rhs) = this.expr()? else {
                    return Ok(None);
                };
                return arith::add(lhs, rhs, op.span).map(Some);
            }

            if let Some(op) = this.engine.accept(TokenKind::Minus)? {
                let Some(rhs) = this.expr()? else {
                    return Ok(None);
                };
                return arith::sub(lhs, rhs, op.span).map(Some);
            }

            Ok(Some(lhs))
        })
    }

    fn term(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Term, |this| {
            let Some(lhs) = this.factor()? else {
                return Ok(None);
            };

            if let Some(op) = this.engine.accept(TokenKind::Multiply)? {
                let Some(rhs) = this.term()? else {
                    return Ok(None);
                };
                return arith::mul(lhs, rhs, op.span).map(Some);
            }

            if let Some(op) = this.engine.accept(TokenKind::Divide)? {
                let Some(rhs) = this.term()? else {
                    return Ok(None);
                };
                return arith::div(lhs, rhs, op.span).map(Some);
            }

            Ok(Some(lhs))
        })
    }

    fn factor(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Factor, |this| {
            if let Some(token) = this.engine.accept(TokenKind::Number)? {
                return arith::number(&token).map(Some);
            }

            if let Some(token) = this.engine.accept(TokenKind::Identifier)? {
                return arith::lookup(&this.env, &token).map(Some);
            }

            if this.engine.match_kind(TokenKind::Lp)? {
                let value = this.expr()?;
                if value.is_some() && this.engine.match_kind(TokenKind::Rp)? {
                    return Ok(value);
                }
            }

            Ok(None)
        })
    }
}

impl<O: ParseObserver> Grammar for NaiveCalculator<O> {
    type Observer = O;

    fn engine(&mut self) -> &mut Engine<O> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Silent;

    fn naive() -> NaiveCalculator<Silent> {
        NaiveCalculator::with_observer(Silent).unwrap()
    }

    #[test]
    fn groups_to_the_right() {
        let mut c = naive();
        assert_eq!(c.parse("6-5-5").unwrap(), 6);
        assert_eq!(c.parse("8/4/2").unwrap(), 4);
        assert_eq!(c.parse("2-1+1").unwrap(), 0);
    }

    #[test]
    fn precedence_still_holds() {
        let mut c = naive();
        assert_eq!(c.parse("2+3*4").unwrap(), 14);
        assert_eq!(c.parse("(2+3)*4").unwrap(), 20);
    }

    #[test]
    fn shares_assignment_semantics() {
        let mut c = naive();
        assert_eq!(c.parse("set x = 10+4*7").unwrap(), 38);
        assert_eq!(c.parse("x*8+7").unwrap(), 311);
        assert_eq!(c.environment().get("x"), Some(38));
        assert!(c.parse("q").unwrap_err().is_fatal());
    }

    #[test]
    fn has_no_power_operator() {
        assert!(matches!(naive().parse("2^3"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let mut c = naive();
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(c.parse(&nested(50)).unwrap(), 1);
        assert!(matches!(
            c.parse(&nested(10_000)),
            Err(ParseError::NestingTooDeep { .. })
        ));

        // right recursion nests once per operator as well
        let chain = vec!["1"; 1_000].join("+");
        assert!(matches!(
            c.parse(&chain),
            Err(ParseError::NestingTooDeep { .. })
        ));
        assert_eq!(c.parse(&vec!["1"; 50].join("+")).unwrap(), 50);
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            naive().parse("1 2"),
            Err(ParseError::TrailingInput { .. })
        ));
    }
}
