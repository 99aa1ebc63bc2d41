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

//! Integer semantics shared by both calculators.
//!
//! Every operator is checked: overflow, a zero divisor and a negative
//! exponent are errors, never wrapped or silently converted.

use crate::environment::Environment;
use crate::error::ParseError;
use crate::lexer::Token;
use crate::span::Span;

/// Value of a NUMBER token.
pub fn number(token: &Token) -> Result<i64, ParseError> {
    token
        .value
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber {
            literal: token.value.clone(),
            span: token.span,
        })
}

/// Value bound to an IDENTIFIER token. There is no default for unset names.
pub fn lookup(env: &Environment, token: &Token) -> Result<i64, ParseError> {
    env.get(&token.value).ok_or_else(|| {
        log::error!("Identifier {} not set", token.value);
        ParseError::UndefinedIdentifier {
            name: token.value.clone(),
            span: token.span,
        }
    })
}

pub fn add(lhs: i64, rhs: i64, span: Span) -> Result<i64, ParseError> {
    lhs.checked_add(rhs).ok_or(ParseError::Overflow { span })
}

pub fn sub(lhs: i64, rhs: i64, span: Span) -> Result<i64, ParseError> {
    lhs.checked_sub(rhs).ok_or(ParseError::Overflow { span })
}

pub fn mul(lhs: i64, rhs: i64, span: Span) -> Result<i64, ParseError> {
    lhs.checked_mul(rhs).ok_or(ParseError::Overflow { span })
}

/// Integer division, truncating toward zero.
pub fn div(lhs: i64, rhs: i64, span: Span) -> Result<i64, ParseError> {
    if rhs == 0 {
        return Err(ParseError::DivisionByZero { span });
    }
    // i64::MIN / -1 is the only remaining failure
    lhs.checked_div(rhs).ok_or(ParseError::Overflow { span })
}

/// `base ^ exponent` with a non-negative exponent.
///
/// # Behavior
/// - Negative exponent → `NegativeExponent`
/// - Result outside `i64` → `Overflow`
pub fn pow(base: i64, exponent: i64, span: Span) -> Result<i64, ParseError> {
    if exponent < 0 {
        return Err(ParseError::NegativeExponent { exponent, span });
    }

    match u32::try_from(exponent) {
        Ok(exp) => base.checked_pow(exp).ok_or(ParseError::Overflow { span }),
        // only 0, 1 and -1 survive exponents this large
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Err(ParseError::Overflow { span }),
        },
    }
}
