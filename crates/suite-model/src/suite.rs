// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Test suite: the ordered list of items in the current run.
//!
//! # Type-State Pattern
//!
//! ```text
//! TestSuite<Collected>   : ids gathered, not yet checked.
//!       │  .validate()
//!       ▼
//! TestSuite<Validated>   : ids non-empty and unique, ready for splitting.
//! ```
//!
//! The planner only accepts `TestSuite<Validated>`, so it never has to
//! deal with duplicate ids. Order is significant: every worker must see
//! the items in the same order to compute the same split.

use crate::{SuiteError, WorkItem};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: items collected but not validated.
#[derive(Debug, Clone)]
pub struct Collected;

/// Marker: items validated and ready for splitting.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for suite states.
pub trait SuiteState: fmt::Debug + Clone {}
impl SuiteState for Collected {}
impl SuiteState for Validated {}

// ── TestSuite ──────────────────────────────────────────────────────

/// The ordered items of one test run.
#[derive(Debug, Clone)]
pub struct TestSuite<S: SuiteState = Collected> {
    items: Vec<WorkItem>,
    _state: std::marker::PhantomData<S>,
}

// ── Collected state ────────────────────────────────────────────────

impl TestSuite<Collected> {
    /// Creates a suite in the `Collected` state.
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items,
            _state: std::marker::PhantomData,
        }
    }

    /// Builds a suite from an iterator of ids.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(ids.into_iter().map(WorkItem::new).collect())
    }

    /// Parses a plain-text id list: one id per line.
    ///
    /// Surrounding whitespace is trimmed; blank lines and lines starting
    /// with `#` are skipped.
    pub fn parse_id_list(text: &str) -> Self {
        Self::from_ids(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Reads an id list from a file. See [`TestSuite::parse_id_list`].
    pub fn from_file(path: &Path) -> Result<Self, SuiteError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse_id_list(&text))
    }

    /// Validates the suite and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - No id is empty.
    /// - No id appears twice.
    ///
    /// An empty suite is valid: splitting it yields empty groups.
    pub fn validate(self) -> Result<TestSuite<Validated>, SuiteError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for (position, item) in self.items.iter().enumerate() {
            if item.id().is_empty() {
                return Err(SuiteError::EmptyId { position });
            }
            if !seen.insert(item.id()) {
                return Err(SuiteError::DuplicateId {
                    id: item.id().to_string(),
                });
            }
        }

        tracing::debug!("validated suite of {} items", self.items.len());

        Ok(TestSuite {
            items: self.items,
            _state: std::marker::PhantomData,
        })
    }
}

// ── Validated state ────────────────────────────────────────────────

impl TestSuite<Validated> {
    /// Returns the items in run order.
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Returns an iterator over the items in run order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.iter()
    }

    /// Returns the item at `index`.
    pub fn item(&self, index: usize) -> Option<&WorkItem> {
        self.items.get(index)
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: SuiteState> TestSuite<S> {
    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the suite has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: SuiteState> fmt::Display for TestSuite<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TestSuite ({} items):", self.items.len())?;
        for item in &self.items {
            writeln!(f, "  {item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_ok() {
        let suite = TestSuite::from_ids(["a.py::t1", "a.py::t2", "b.py::t1"])
            .validate()
            .unwrap();
        assert_eq!(suite.len(), 3);
        assert_eq!(suite.item(2).unwrap().id(), "b.py::t1");
        assert!(suite.item(3).is_none());
    }

    #[test]
    fn test_validate_empty_suite() {
        let suite = TestSuite::new(vec![]).validate().unwrap();
        assert!(suite.is_empty());
    }

    #[test]
    fn test_validate_duplicate() {
        let err = TestSuite::from_ids(["a.py::t1", "b.py::t1", "a.py::t1"])
            .validate()
            .unwrap_err();
        assert!(matches!(err, SuiteError::DuplicateId { ref id } if id == "a.py::t1"));
    }

    #[test]
    fn test_validate_empty_id() {
        let err = TestSuite::from_ids(["a.py::t1", ""]).validate().unwrap_err();
        assert!(matches!(err, SuiteError::EmptyId { position: 1 }));
    }

    #[test]
    fn test_parse_id_list() {
        let text = "# collected by ci\n a.py::t1 \n\nb.py::t2\n#skip.py::t\n";
        let suite = TestSuite::parse_id_list(text).validate().unwrap();
        let ids: Vec<_> = suite.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["a.py::t1", "b.py::t2"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a.py::t1\na.py::t2").unwrap();
        let suite = TestSuite::from_file(file.path()).unwrap();
        assert_eq!(suite.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let result = TestSuite::from_file(Path::new("/nonexistent/ids.txt"));
        assert!(matches!(result, Err(SuiteError::Io(_))));
    }

    #[test]
    fn test_display() {
        let suite = TestSuite::from_ids(["a.py::t1", "b.py::t2"]);
        let display = format!("{suite}");
        assert!(display.contains("2 items"));
        assert!(display.contains("b.py::t2"));
    }
}
