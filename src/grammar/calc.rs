/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     calc.rs
 * Purpose:  Precedence-correct calculator grammar
 *
 * Author:   Sam Wilcox
 *
 * --------------------------------------------------------------------------
 *  LICENSE
 * --------------------------------------------------------------------------
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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * The grammar, one procedure per rule:
 *
 *   start  : "set" IDENTIFIER "=" expr | expr
 *   expr   : term ( ("+" | "-") term )*
 *   term   : power ( ("*" | "/") power )*
 *   power  : factor "^" power | factor
 *   factor : NUMBER | IDENTIFIER | "(" expr ")"
 *
 * `expr` and `term` loop over same-precedence operators and accumulate
 * left to right, so `6-5-5` is `(6-5)-5`. `power` recurses on its right
 * operand, so `2^3^2` is `2^(3^2)`.
 *
 * Values are computed while parsing; no tree is built.
 *
 * ==========================================================================
 */

use crate::environment::Environment;
use crate::error::{LexError, ParseError};
use crate::grammar::arith;
use crate::lexer::{rules, LexerConfig, TokenKind};
use crate::parser::{Engine, Grammar, LogObserver, ParseObserver, Production};

/// The precedence-correct calculator.
///
/// Each procedure returns `Ok(Some(value))` when it recognised its rule,
/// `Ok(None)` when the lookahead does not fit (the "no value" sentinel that
/// `start` turns into a syntax error), and `Err` for failures that are not
/// about syntax, such as an undefined identifier.
///
/// # Example
/// ```rust
/// # use descent::Calculator;
/// let mut calc = Calculator::new().unwrap();
/// assert_eq!(calc.parse("set x = 10").unwrap(), 10);
/// assert_eq!(calc.parse("x * 2 ^ 3").unwrap(), 80);
/// ```
pub struct Calculator<O: ParseObserver = LogObserver> {
    engine: Engine<O>,
    env: Environment,
}

impl Calculator<LogObserver> {
    /// Builds a calculator with the built-in rule table, logging every
    /// production through `LogObserver`.
    pub fn new() -> Result<Self, LexError> {
        Self::with_observer(LogObserver)
    }
}

impl<O: ParseObserver> Calculator<O> {
    /// Builds a calculator with the built-in rule table.
    ///
    /// # Arguments
    /// - `observer` → receives production entry/exit and consumed tokens
    pub fn with_observer(observer: O) -> Result<Self, LexError> {
        Self::with_config(rules::calculator(), observer)
    }

    /// Uses a custom rule table; it must produce the calculator's kinds.
    pub fn with_config(config: LexerConfig, observer: O) -> Result<Self, LexError> {
        Ok(Self {
            engine: Engine::with_observer(config, observer)?,
            env: Environment::new(),
        })
    }

    /// Parses and evaluates one statement.
    ///
    /// Assignments made here stay in the environment for later calls.
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

    /// start : "set" IDENTIFIER "=" expr | expr
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

    /// The part of `start` after `set`.
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

            log::debug!("set {} = {}", name.value, value);
            this.env.set(name.value, value);
            Ok(Some(value))
        })
    }

    /// expr : term ( ("+" | "-") term )*
    fn expr(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Expr, |this| {
            let Some(mut result) = this.term()? else {
                return Ok(None);
            };
            log::debug!("lhs after first term {}", result);

            loop {
                let (op, subtract) = if let Some(op) = this.engine.accept(TokenKind::Plus)? {
                    (op, false)
                } else if let Some(op) = this.engine.accept(TokenKind::Minus)? {
                    (op, true)
                } else {
                    // Out of tokens, or the lookahead belongs to an
                    // enclosing rule (`)`) or is garbage; start sorts it out.
                    break;
                };

                let Some(value) = this.term()? else {
                    return Ok(None);
                };
                result = if subtract {
                    arith::sub(result, value, op.span)?
                } else {
                    arith::add(result, value, op.span)?
                };
                log::debug!("running total is {}", result);
            }

            Ok(Some(result))
        })
    }

    /// term : power ( ("*" | "/") power )*
    fn term(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Term, |this| {
            let Some(mut result) = this.power()? else {
                return Ok(None);
            };

            loop {
                let (op, divide) = if let Some(op) = this.engine.accept(TokenKind::Multiply)? {
                    (op, false)
                } else if let Some(op) = this.engine.accept(TokenKind::Divide)? {
                    (op, true)
                } else {
                    break;
                };

                let Some(value) = this.power()? else {
                    return Ok(None);
                };
                result = if divide {
                    arith::div(result, value, op.span)?
                } else {
                    arith::mul(result, value, op.span)?
                };
            }

            Ok(Some(result))
        })
    }

    /// power : factor "^" power | factor
    fn power(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Power, |this| {
            let Some(base) = this.factor()? else {
                return Ok(None);
            };
            let Some(op) = this.engine.accept(TokenKind::Power)? else {
                return Ok(Some(base));
            };

            // right-recursive: exponentiation groups to the right
            let Some(exponent) = this.power()? else {
                return Ok(None);
            };
            arith::pow(base, exponent, op.span).map(Some)
        })
    }

    /// factor : NUMBER | IDENTIFIER | "(" expr ")"
    fn factor(&mut self) -> Result<Option<i64>, ParseError> {
        self.traced(Production::Factor, |this| {
            if let Some(token) = this.engine.accept(TokenKind::Number)? {
                return arith::number(&token).map(Some);
            }

            if let Some(token) = this.engine.accept(TokenKind::Identifier)? {
                return arith::lookup(&this.env, &token).map(Some);
            }

            if this.engine.match_kind(TokenKind::Lp)? {
                let Some(value) = this.expr()? else {
                    return Ok(None);
                };
                if this.engine.match_kind(TokenKind::Rp)? {
                    return Ok(Some(value));
                }
            }

            Ok(None)
        })
    }
}

impl<O: ParseObserver> Grammar for Calculator<O> {
    type Observer = O;

    fn engine(&mut self) -> &mut Engine<O> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Silent, Tracer, MAX_DEPTH};

    fn calc() -> Calculator<Silent> {
        let _ = env_logger::builder().is_test(true).try_init();
        Calculator::with_observer(Silent).unwrap()
    }

    fn eval(input: &str) -> i64 {
        calc()
            .parse(input)
            .unwrap_or_else(|e| panic!("{input:?} failed: {e}"))
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(eval("6-5-5"), -4);
        assert_eq!(eval("10 - 2 + 3"), 11);
        assert_eq!(eval("1-1-1-1"), -2);
    }

    #[test]
    fn division_is_left_associative_and_truncates() {
        assert_eq!(eval("5*8/4/2"), 5);
        assert_eq!(eval("7/2"), 3);
        assert_eq!(eval("100/10/5"), 2);
    }

    #[test]
    fn exponentiation_is_right_associative() {
        assert_eq!(eval("2^3^2"), 512);
        assert_eq!(eval("(2^3)^2"), 64);
        assert_eq!(eval("2^(1+2)"), 8);
    }

    #[test]
    fn precedence_levels() {
        assert_eq!(eval("2+3*4"), 14);
        assert_eq!(eval("2*3+4"), 10);
        assert_eq!(eval("2+3^2"), 11);
        assert_eq!(eval("2*3^2"), 18);
        assert_eq!(eval("(2+3)*4"), 20);
        assert_eq!(eval("((7))"), 7);
    }

    #[test]
    fn assignment_persists_across_parses() {
        let mut c = calc();
        assert_eq!(c.parse("set x = 10").unwrap(), 10);
        assert_eq!(c.parse("x*2").unwrap(), 20);
        assert_eq!(c.parse("set x = x + 1").unwrap(), 11);
        assert_eq!(c.environment().get("x"), Some(11));
        assert_eq!(c.parse("set x = 10+4*7").unwrap(), 38);
        assert_eq!(c.parse("x*8+7").unwrap(), 311);
    }

    #[test]
    fn undefined_identifier_is_an_error_not_zero() {
        let mut c = calc();
        let err = c.parse("y+1").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            ParseError::UndefinedIdentifier { ref name, .. } if name == "y"
        ));
        assert!(c.environment().is_empty());
    }

    #[test]
    fn failed_assignment_does_not_bind() {
        let mut c = calc();
        assert!(c.parse("set z = 1/0").is_err());
        assert!(!c.environment().contains("z"));
        assert!(c.parse("set z =").is_err());
        assert!(!c.environment().contains("z"));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let mut c = calc();
        assert!(matches!(
            c.parse("5 5"),
            Err(ParseError::TrailingInput { found }) if found.value == "5"
        ));
        assert!(matches!(
            c.parse("(1+2))"),
            Err(ParseError::TrailingInput { .. })
        ));
        assert_eq!(c.parse("5").unwrap(), 5);
    }

    #[test]
    fn malformed_input_is_classified() {
        let mut c = calc();
        assert!(matches!(c.parse(""), Err(ParseError::UnexpectedEnd)));
        assert!(matches!(c.parse("5+"), Err(ParseError::UnexpectedEnd)));
        assert!(matches!(c.parse("(5"), Err(ParseError::UnexpectedEnd)));
        assert!(matches!(c.parse("set"), Err(ParseError::UnexpectedEnd)));
        assert!(matches!(
            c.parse("5+)"),
            Err(ParseError::UnexpectedToken { found }) if found.kind == TokenKind::Rp
        ));
        assert!(matches!(
            c.parse("set 5 = 1"),
            Err(ParseError::UnexpectedToken { found }) if found.kind == TokenKind::Number
        ));
        assert!(matches!(c.parse("2 % 3"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn arithmetic_errors_are_typed() {
        let mut c = calc();
        assert!(matches!(c.parse("1/0"), Err(ParseError::DivisionByZero { .. })));
        assert!(matches!(c.parse("1/(2-2)"), Err(ParseError::DivisionByZero { .. })));
        assert!(matches!(
            c.parse("2^(0-1)"),
            Err(ParseError::NegativeExponent { exponent: -1, .. })
        ));
        assert!(matches!(c.parse("2^64"), Err(ParseError::Overflow { .. })));
    }

    #[test]
    fn running_total_only_overflows_when_the_result_does() {
        assert_eq!(eval("(0-5) + 9223372036854775807 + 1"), i64::MAX - 4);
        assert_eq!(eval("(0-1) - (0-9223372036854775807-1)"), i64::MAX);
        assert_eq!(eval("9223372036854775807 - 2 + 1"), i64::MAX - 1);
        assert!(matches!(
            calc().parse("9223372036854775807 + 1"),
            Err(ParseError::Overflow { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let mut c = calc();
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(c.parse(&nested(50)).unwrap(), 1);
        for depth in [100, 1_000, 50_000] {
            assert!(matches!(
                c.parse(&nested(depth)),
                Err(ParseError::NestingTooDeep { limit: MAX_DEPTH, .. })
            ));
        }
        let towers = vec!["1"; 1_000].join("^");
        assert!(matches!(
            c.parse(&towers),
            Err(ParseError::NestingTooDeep { .. })
        ));

        // the limit is per parse, not cumulative
        assert_eq!(c.parse(&nested(50)).unwrap(), 1);
    }

    #[test]
    fn reparsing_is_idempotent() {
        let mut c = calc();
        let first = c.parse("3*(4+5)^2-1").unwrap();
        let second = c.parse("3*(4+5)^2-1").unwrap();
        assert_eq!(first, 242);
        assert_eq!(first, second);
    }

    #[test]
    fn tracer_sees_every_production() {
        let mut c = Calculator::with_observer(Tracer::new()).unwrap();
        assert_eq!(c.parse("2^3").unwrap(), 8);
        assert_eq!(
            c.observer().productions(),
            vec![
                Production::Start,
                Production::Expr,
                Production::Term,
                Production::Power,
                Production::Factor,
                Production::Power,
                Production::Factor,
            ]
        );
        assert_eq!(c.observer().events().last().map(|e| e.depth), Some(6));
    }
}
