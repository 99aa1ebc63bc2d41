/*
 * ==========================================================================
 * DESCENT - Parsing by Hand
 * ==========================================================================
 *
 * File:     grammar/mod.rs
 * Purpose:  The grammars built on the shared LL(1) engine.
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

/// Checked integer operators shared by the calculators.
pub mod arith;

/// Precedence-correct calculator:
/// - start → expr → term → power → factor
pub mod calc;

/// Right-recursive calculator with the associativity bug.
pub mod naive;

/// CSV records.
pub mod csv;

pub use calc::Calculator;
pub use csv::CsvParser;
pub use naive::NaiveCalculator;
