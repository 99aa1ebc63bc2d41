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

use regex::Regex;
use serde::Deserialize;

use crate::error::LexError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// One entry of a rule table: a regular expression and the kind of token
/// it produces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub kind: TokenKind,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }
}

fn default_skip_whitespace() -> bool {
    true
}

/// An ordered rule table plus scanning options.
///
/// Order matters: when several rules match at the same position, the one
/// declared first wins, regardless of match length.
///
/// Loadable from JSON:
/// ```json
/// { "rules": [ { "pattern": "\\d+", "kind": "NUMBER" } ],
///   "skip_whitespace": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexerConfig {
    pub rules: Vec<Rule>,

    #[serde(default = "default_skip_whitespace")]
    pub skip_whitespace: bool,
}

impl LexerConfig {
    pub fn new(rules: Vec<Rule>, skip_whitespace: bool) -> Self {
        Self {
            rules,
            skip_whitespace,
        }
    }

    /// Parses a rule table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, LexError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Regex-rule lexer.
///
/// All rules are compiled into a single anchored alternation of named
/// groups, so one regex search per token decides both the extent and the
/// kind of the token. The lexer is single pass: `set_input` rewinds it onto
/// a fresh string.
pub struct Lexer {
    regex: Regex,
    groups: Vec<(String, TokenKind)>,
    skip_whitespace: bool,

    input: String,
    /// Byte offset of the next unscanned character.
    pos: usize,
    line: usize,
    /// Characters since the start of the current line.
    column: usize,
}

impl Lexer {
    /// Compiles a rule table into a lexer with empty input.
    ///
    /// # Errors
    /// - `LexError::NoRules` for an empty table
    /// - `LexError::InvalidRule` if a pattern does not compile
    /// - `LexError::EmptyMatch` if a pattern accepts the empty string
    pub fn new(config: LexerConfig) -> Result<Self, LexError> {
        if config.rules.is_empty() {
            return Err(LexError::NoRules);
        }

        let mut groups = Vec::with_capacity(config.rules.len());
        let mut alternatives = Vec::with_capacity(config.rules.len());

        for (index, rule) in config.rules.iter().enumerate() {
            let single = Regex::new(&rule.pattern).map_err(|source| LexError::InvalidRule {
                pattern: rule.pattern.clone(),
                kind: rule.kind,
                source,
            })?;

            if single.is_match("") {
                return Err(LexError::EmptyMatch {
                    pattern: rule.pattern.clone(),
                    kind: rule.kind,
                });
            }

            let name = format!("rule{index}");
            alternatives.push(format!("(?P<{}>{})", name, rule.pattern));
            groups.push((name, rule.kind));
        }

        let combined = format!(r"\A(?:{})", alternatives.join("|"));
        let regex = Regex::new(&combined).map_err(|source| LexError::InvalidRule {
            pattern: combined.clone(),
            kind: config.rules[0].kind,
            source,
        })?;

        log::debug!("compiled {} lexer rules", groups.len());

        Ok(Self {
            regex,
            groups,
            skip_whitespace: config.skip_whitespace,
            input: String::new(),
            pos: 0,
            line: 1,
            column: 0,
        })
    }

    /// Replaces the input and rewinds to its start.
    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
        self.pos = 0;
        self.line = 1;
        self.column = 0;
    }

    /// Scans the next token.
    ///
    /// Returns `Ok(None)` once the input is exhausted; keeps returning it on
    /// further calls.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.skip_whitespace {
            self.skip_blank();
        }

        if self.pos >= self.input.len() {
            return Ok(None);
        }

        let span = self.span_here();
        let rest = &self.input[self.pos..];

        let Some(caps) = self.regex.captures(rest) else {
            // pos sits on a char boundary, so rest is never empty here
            let ch = rest.chars().next().unwrap_or('\0');
            return Err(LexError::UnexpectedCharacter { ch, span });
        };

        let (kind, text) = self
            .groups
            .iter()
            .find_map(|(name, kind)| caps.name(name).map(|m| (*kind, m.as_str())))
            .filter(|(_, text)| !text.is_empty())
            .ok_or(LexError::UnexpectedCharacter {
                ch: rest.chars().next().unwrap_or('\0'),
                span,
            })?;

        let token = Token::new(kind, text, span);
        self.consume(token.value.len());

        Ok(Some(token))
    }

    fn span_here(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn skip_blank(&mut self) {
        let skipped = self.input[self.pos..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        self.consume(skipped);
    }

    /// Moves `pos` forward by `len` bytes, tracking line and column.
    fn consume(&mut self, len: usize) {
        let end = self.pos + len;
        for ch in self.input[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Convenience: lexes a whole string with the given rules.
pub fn tokenize(config: LexerConfig, input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(config)?;
    lexer.set_input(input);
    lexer.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::rules;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn skips_whitespace_and_records_columns() {
        let tokens = tokenize(rules::calculator(), "set x = 10 + 4").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Set,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
            ]
        );
        assert_eq!(tokens[1].value, "x");
        assert_eq!(tokens[1].span, Span::new(1, 4));
        assert_eq!(tokens[3].value, "10");
        assert_eq!(tokens[5].span, Span::new(1, 13));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens = tokenize(rules::csv(), "é,x\nü,\"y\"").unwrap();
        assert_eq!(tokens[2].value, "x\nü");

        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(1, 0),
                Span::new(1, 1),
                Span::new(1, 2),
                Span::new(2, 1),
                Span::new(2, 2),
                Span::new(2, 3),
                Span::new(2, 4),
            ]
        );
    }

    #[test]
    fn long_lines_keep_exact_columns() {
        let input = format!("{}1", "1+".repeat(20_000));
        let tokens = tokenize(rules::calculator(), &input).unwrap();
        assert_eq!(tokens.len(), 40_001);
        assert_eq!(tokens.last().map(|t| t.span), Some(Span::new(1, 40_000)));
    }

    #[test]
    fn keyword_only_matches_whole_word() {
        let tokens = tokenize(rules::calculator(), "settle set").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier, TokenKind::Set]);
        assert_eq!(tokens[0].value, "settle");
    }

    #[test]
    fn first_declared_rule_wins() {
        let config = LexerConfig::new(
            vec![
                Rule::new("a", TokenKind::Plus),
                Rule::new("ab", TokenKind::Minus),
                Rule::new("b", TokenKind::Number),
            ],
            true,
        );
        let tokens = tokenize(config, "ab").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::Plus, TokenKind::Number]);
    }

    #[test]
    fn unknown_character_is_reported_with_position() {
        let err = tokenize(rules::calculator(), "1 +\n 2 $").unwrap_err();
        match err {
            LexError::UnexpectedCharacter { ch, span } => {
                assert_eq!(ch, '$');
                assert_eq!(span, Span::new(2, 3));
            }
            other => panic!("expected UnexpectedCharacter, got {:?}", other),
        }
    }

    #[test]
    fn empty_matching_rule_is_rejected() {
        let config = LexerConfig::new(vec![Rule::new("[^,]*", TokenKind::String)], false);
        assert!(matches!(Lexer::new(config), Err(LexError::EmptyMatch { .. })));
    }

    #[test]
    fn bad_pattern_and_empty_table_are_rejected() {
        let config = LexerConfig::new(vec![Rule::new("(", TokenKind::Lp)], true);
        assert!(matches!(Lexer::new(config), Err(LexError::InvalidRule { .. })));
        assert!(matches!(
            Lexer::new(LexerConfig::new(Vec::new(), true)),
            Err(LexError::NoRules)
        ));
    }

    #[test]
    fn whitespace_is_kept_when_not_skipping() {
        let tokens = tokenize(rules::csv(), "a b, c").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::String, TokenKind::Comma, TokenKind::String]
        );
        assert_eq!(tokens[0].value, "a b");
        assert_eq!(tokens[2].value, " c");
    }

    #[test]
    fn exhausted_lexer_stays_exhausted() {
        let mut lexer = Lexer::new(rules::calculator()).unwrap();
        lexer.set_input("7");
        assert!(lexer.next_token().unwrap().is_some());
        assert!(lexer.next_token().unwrap().is_none());
        assert!(lexer.next_token().unwrap().is_none());

        lexer.set_input("8 9");
        assert_eq!(lexer.count(), 2);
    }

    #[test]
    fn config_loads_from_json() {
        let config = LexerConfig::from_json(
            r#"{ "rules": [ { "pattern": "\\d+", "kind": "NUMBER" },
                            { "pattern": "\\+", "kind": "PLUS" } ] }"#,
        )
        .unwrap();
        assert!(config.skip_whitespace);
        let tokens = tokenize(config, "1 + 2").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number]
        );

        assert!(matches!(
            LexerConfig::from_json("{ \"rules\": 3 }"),
            Err(LexError::Config(_))
        ));
    }
}
