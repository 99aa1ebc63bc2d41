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

use crate::lexer::lexer::{LexerConfig, Rule};
use crate::lexer::token::TokenKind;

/// Rule table for the precedence calculator.
///
/// # Behavior
/// - `set` is listed **before** identifiers and anchored on a word
///   boundary, so `set` is a keyword while `settle` stays an identifier.
/// - Whitespace between tokens is skipped.
///
/// # Examples
/// ```text
/// set x = 2^3   -> SET IDENTIFIER EQUALS NUMBER POWER NUMBER
/// (x+1)*y       -> LP IDENTIFIER PLUS NUMBER RP MULTIPLY IDENTIFIER
/// ```
pub fn calculator() -> LexerConfig {
    let mut rules = naive_rules();
    rules.push(Rule::new(r"\^", TokenKind::Power));
    LexerConfig::new(rules, true)
}

/// Rule table for the naive calculator: the same terminals minus `^`.
pub fn naive_calculator() -> LexerConfig {
    LexerConfig::new(naive_rules(), true)
}

fn naive_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"set\b", TokenKind::Set),
        Rule::new(r"\d+", TokenKind::Number),
        Rule::new(r"[a-zA-Z_]\w*", TokenKind::Identifier),
        Rule::new(r"\+", TokenKind::Plus),
        Rule::new(r"-", TokenKind::Minus),
        Rule::new(r"\*", TokenKind::Multiply),
        Rule::new(r"/", TokenKind::Divide),
        Rule::new(r"\(", TokenKind::Lp),
        Rule::new(r"\)", TokenKind::Rp),
        Rule::new(r"=", TokenKind::Equals),
    ]
}

/// Rule table for CSV records.
///
/// Whitespace is significant inside fields, so it is not skipped.
pub fn csv() -> LexerConfig {
    LexerConfig::new(
        vec![
            Rule::new(",", TokenKind::Comma),
            Rule::new("\"", TokenKind::Quote),
            Rule::new(r#"[^,"]+"#, TokenKind::String),
        ],
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lexer::Lexer;

    #[test]
    fn built_in_tables_compile() {
        for config in [calculator(), naive_calculator(), csv()] {
            assert!(Lexer::new(config).is_ok());
        }
    }

    #[test]
    fn only_the_precedence_table_knows_power() {
        let has_power =
            |config: LexerConfig| config.rules.iter().any(|r| r.kind == TokenKind::Power);
        assert!(has_power(calculator()));
        assert!(!has_power(naive_calculator()));
    }
}
