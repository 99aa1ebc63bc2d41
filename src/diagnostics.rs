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

use std::fmt::Write as _;

use crate::error::ParseError;
use crate::span::Span;

/// Renders compiler-style diagnostics for a parse error.
///
/// The offending input line is shown with a caret under the column the
/// error points at:
///
/// ```text
/// error[E0005]: identifier 'y' not set
///   --> --input:1:1
///    |
///  1 | y+1
///    | ^
/// help: assign it first, e.g. `set x = 10`
/// ```
///
/// Errors without a position (e.g. unexpected end of input) get the header
/// and help line only.
pub struct DiagnosticPrinter {
    /// Full input text the error refers to.
    source: String,

    /// Where the input came from, for display only.
    origin: String,
}

impl DiagnosticPrinter {
    /// # Arguments
    /// - `origin` → label shown in the `-->` line, e.g. `--input`
    /// - `source` → full text the error positions refer to
    pub fn new(origin: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Formats `error` as a multi-line diagnostic ending in a newline.
    pub fn render(&self, error: &ParseError) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "error[{}]: {}", error.code(), error);

        if let Some(Span { line, column }) = error.span() {
            // Lines are 1-indexed in diagnostics
            let src_line = self
                .source
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("");

            let _ = writeln!(out, "  --> {}:{}:{}", self.origin, line, column + 1);
            let _ = writeln!(out, "   |");
            let _ = writeln!(out, "{:>2} | {}", line, src_line);
            let _ = writeln!(out, "   | {}^", " ".repeat(column));
        }

        if let Some(help) = error.help() {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Writes the rendered diagnostic to stderr.
    pub fn print(&self, error: &ParseError) {
        eprint!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_sits_under_the_error_column() {
        let printer = DiagnosticPrinter::new("--input", "x + y");
        let err = ParseError::UndefinedIdentifier {
            name: "y".into(),
            span: Span::new(1, 4),
        };
        let rendered = printer.render(&err);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "error[E0005]: identifier 'y' not set");
        assert_eq!(lines[1], "  --> --input:1:5");
        assert_eq!(lines[3], " 1 | x + y");
        assert_eq!(lines[4], "   |     ^");
        assert!(lines[5].starts_with("help:"));
    }

    #[test]
    fn positionless_errors_render_header_only() {
        let printer = DiagnosticPrinter::new("--input", "5+");
        assert_eq!(
            printer.render(&ParseError::UnexpectedEnd),
            "error[E0003]: unexpected end of input\n"
        );
    }
}
