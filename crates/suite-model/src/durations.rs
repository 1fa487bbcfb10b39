// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Historical per-test durations.
//!
//! # Store Format
//! The duration store is a single JSON object mapping test ids to the
//! seconds they took on a previous run:
//!
//! ```json
//! {
//!   "tests/test_io.py::test_read": 0.42,
//!   "tests/test_io.py::test_write": 1.7
//! }
//! ```
//!
//! Every value is checked on the way in: negative, NaN and infinite
//! durations are rejected, so downstream estimation can trust the record.

use crate::suite::Validated;
use crate::{SuiteError, TestSuite};
use std::collections::BTreeMap;
use std::path::Path;

/// Historical durations in seconds, keyed by test id.
///
/// May be stale (ids no longer in the suite) or incomplete (suite ids
/// with no entry). Use [`DurationRecord::relevant_to`] to drop stale ids.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct DurationRecord {
    entries: BTreeMap<String, f64>,
}

impl DurationRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(id, seconds)` pairs, validating each value.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, SuiteError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut record = Self::new();
        for (id, seconds) in entries {
            record.insert(id, seconds)?;
        }
        Ok(record)
    }

    /// Parses the JSON duration store.
    pub fn from_json(json: &str) -> Result<Self, SuiteError> {
        let raw: BTreeMap<String, f64> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    /// Reads and parses the JSON duration store at `path`.
    pub fn from_file(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        let record = Self::from_json(&content)?;
        tracing::debug!(
            "loaded {} durations from '{}'",
            record.len(),
            path.display()
        );
        Ok(record)
    }

    /// Inserts or replaces the duration for `id`.
    pub fn insert(&mut self, id: impl Into<String>, seconds: f64) -> Result<(), SuiteError> {
        let id = id.into();
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SuiteError::InvalidDuration { id, value: seconds });
        }
        self.entries.insert(id, seconds);
        Ok(())
    }

    /// Returns the recorded duration for `id`.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries.get(id).copied()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over `(id, seconds)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, &s)| (id.as_str(), s))
    }

    /// Returns the sum of all recorded durations.
    pub fn total_seconds(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Returns a copy holding only the entries whose id is in `suite`.
    pub fn relevant_to(&self, suite: &TestSuite<Validated>) -> Self {
        let entries = suite
            .iter()
            .filter_map(|item| self.get(item.id()).map(|s| (item.id().to_string(), s)))
            .collect();
        Self { entries }
    }

    /// Returns up to `count` entries, slowest first.
    ///
    /// Equal durations are ordered by id so the listing is stable.
    pub fn slowest(&self, count: usize) -> Vec<(&str, f64)> {
        let mut all: Vec<(&str, f64)> = self.iter().collect();
        all.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        all.truncate(count);
        all
    }
}
