/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     main.rs
 * Purpose:  Command-line driver for the calculator and CSV parsers
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

//! Command-line interface for the DESCENT parsers.
//!
//! Each subcommand builds one parser and feeds it every `--input` in order,
//! so `set` assignments made by one input are visible to the next:
//!
//! ```text
//! descent calc -i "set x = 10" -i "x*2"
//! descent naive -i "6-5-5"
//! descent csv -i 'a,"b,c",d' --format json
//! ```

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;

use descent::parser::TokenCursor;
use descent::{
    Calculator, CsvParser, DiagnosticPrinter, LexerConfig, LogObserver, NaiveCalculator,
    ParseError, ParseObserver, Production, Token, Tracer,
};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,

    /// Increase output verbosity (debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the production trace after each parse
    #[arg(short, long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates expressions with correct precedence and associativity
    Calc {
        /// Input statement; repeat to parse several on one instance
        #[arg(short, long, default_value = "5+6")]
        input: Vec<String>,

        /// JSON lexer rule table replacing the built-in one
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Evaluates expressions with the right-recursive grammar
    Naive {
        /// Input statement; repeat to parse several on one instance
        #[arg(short, long, default_value = "5+6")]
        input: Vec<String>,
    },

    /// Splits a CSV record into fields
    Csv {
        /// Input record; repeat to parse several
        #[arg(short, long, default_value = "5,6,7")]
        input: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// Logs through `LogObserver` and, with `--trace`, also records a trace.
struct CliObserver {
    log: LogObserver,
    tracer: Option<Tracer>,
}

impl CliObserver {
    fn new(trace: bool) -> Self {
        Self {
            log: LogObserver,
            tracer: trace.then(Tracer::new),
        }
    }

    /// Rendered trace of the last parse, clearing it for the next one.
    fn take_trace(&mut self) -> Option<String> {
        let tracer = self.tracer.as_mut()?;
        let rendered = tracer.render();
        tracer.clear();
        Some(rendered)
    }
}

impl ParseObserver for CliObserver {
    fn enter(&mut self, production: Production, cursor: &TokenCursor) {
        self.log.enter(production, cursor);
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.enter(production, cursor);
        }
    }

    fn exit(&mut self, production: Production) {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.exit(production);
        }
    }

    fn consumed(&mut self, token: &Token) {
        self.log.consumed(token);
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.consumed(token);
        }
    }
}

#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    input: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

/// How a run over the inputs ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failed,
    Fatal,
}

impl Outcome {
    /// 0 when everything parsed, 1 when something failed, 2 on a fatal error.
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
            Outcome::Fatal => ExitCode::from(2),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}[{}:{} - {}] {}",
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Writes one parse result to `out` in the selected format.
///
/// Text failures also get a rendered diagnostic on stderr.
fn report<T, W>(
    out: &mut W,
    input: &str,
    result: Result<T, ParseError>,
    format: Format,
    failure: &str,
) -> Result<Outcome>
where
    T: Display + Serialize,
    W: Write,
{
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(e) if e.is_fatal() => Outcome::Fatal,
        Err(_) => Outcome::Failed,
    };

    match format {
        Format::Text => match result {
            Ok(value) => writeln!(out, "Success! Result is {}", value)?,
            Err(e) => {
                writeln!(out, "{}", failure)?;
                DiagnosticPrinter::new("--input", input).print(&e);
            }
        },
        Format::Json => {
            let report = match result {
                Ok(value) => Report {
                    input,
                    success: true,
                    value: Some(value),
                    error: None,
                    code: None,
                },
                Err(e) => Report {
                    input,
                    success: false,
                    value: None,
                    error: Some(e.to_string()),
                    code: Some(e.code()),
                },
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }

    Ok(outcome)
}

/// Runs `parse` over every input, stopping at the first fatal error.
///
/// # Arguments
/// - `out`   → receives results and traces
/// - `parse` → parses one input, returning its result and rendered trace
fn run_all<T, F, W>(
    out: &mut W,
    inputs: &[String],
    format: Format,
    failure: &str,
    mut parse: F,
) -> Result<Outcome>
where
    T: Display + Serialize,
    F: FnMut(&str) -> (Result<T, ParseError>, Option<String>),
    W: Write,
{
    let mut failed = false;

    for input in inputs {
        log::info!("input is {}", input);
        let (result, trace) = parse(input);

        if let Some(trace) = trace {
            write!(out, "{}", trace)?;
        }

        match report(out, input, result, format, failure)? {
            Outcome::Success => {}
            Outcome::Failed => failed = true,
            Outcome::Fatal => {
                log::error!("stopping at fatal error in {:?}", input);
                return Ok(Outcome::Fatal);
            }
        }
    }

    Ok(if failed {
        Outcome::Failed
    } else {
        Outcome::Success
    })
}

fn load_rules(path: &Path) -> Result<LexerConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("can't read rule table {:?}", path))?;
    LexerConfig::from_json(&json).with_context(|| format!("can't load rule table {:?}", path))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let observer = CliObserver::new(args.trace);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = match args.command {
        Commands::Calc { input, rules } => {
            let mut calc = match rules {
                Some(path) => Calculator::with_config(load_rules(&path)?, observer)?,
                None => Calculator::with_observer(observer)?,
            };
            run_all(&mut out, &input, args.format, "Grammar Error", |line| {
                let result = calc.parse(line);
                (result, calc.observer_mut().take_trace())
            })?
        }

        Commands::Naive { input } => {
            let mut calc = NaiveCalculator::with_observer(observer)?;
            run_all(&mut out, &input, args.format, "Grammar Error", |line| {
                let result = calc.parse(line);
                (result, calc.observer_mut().take_trace())
            })?
        }

        Commands::Csv { input } => {
            let mut csv = CsvParser::with_observer(observer)?;
            run_all(&mut out, &input, args.format, "Parse Error", |line| {
                let result = csv.parse_joined(line);
                (result, csv.observer_mut().take_trace())
            })?
        }
    };

    Ok(outcome.exit_code())
}
