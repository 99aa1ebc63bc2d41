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

use std::collections::HashMap;

/// Variables assigned with `set`.
///
/// Owned by one calculator and kept across its `parse` calls, so an
/// assignment in one input is visible to every later input on the same
/// instance. Only the assignment production writes; only `factor` reads.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value last assigned to `name`.
    ///
    /// # Returns
    /// `None` if `name` was never set; callers must not substitute a default.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Binds `name`, replacing any earlier value.
    ///
    /// # Returns
    /// The value it replaced, if any.
    pub fn set(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.values.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// All bindings, sorted by name for stable display.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        let mut entries: Vec<(&str, i64)> =
            self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
