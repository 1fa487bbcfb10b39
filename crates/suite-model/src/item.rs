// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Work item identifiers and their decomposition.

use crate::SuiteError;
use std::fmt;

/// Separator between the file component and the name component of an id.
pub const NODE_ID_SEPARATOR: &str = "::";

/// A single test, identified by a qualified id of the form
/// `<file-component>::<name-component>`.
///
/// The id is the only thing the splitter looks at.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct WorkItem {
    id: String,
}

impl WorkItem {
    /// Creates an item from its qualified id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the qualified id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Splits the id into `(file, name)`.
    ///
    /// Fails with [`SuiteError::MalformedId`] unless the id contains the
    /// separator exactly once.
    ///
    /// ```
    /// use suite_model::WorkItem;
    ///
    /// let item = WorkItem::new("tests/test_io.py::test_read");
    /// assert_eq!(item.decompose().unwrap(), ("tests/test_io.py", "test_read"));
    /// assert!(WorkItem::new("tests/test_io.py").decompose().is_err());
    /// ```
    pub fn decompose(&self) -> Result<(&str, &str), SuiteError> {
        let mut parts = self.id.split(NODE_ID_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(file), Some(name), None) => Ok((file, name)),
            _ => Err(SuiteError::MalformedId {
                id: self.id.clone(),
                separators: self.id.matches(NODE_ID_SEPARATOR).count(),
            }),
        }
    }

    /// Returns the file component of the id.
    pub fn file(&self) -> Result<&str, SuiteError> {
        self.decompose().map(|(file, _)| file)
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<&str> for WorkItem {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WorkItem {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
