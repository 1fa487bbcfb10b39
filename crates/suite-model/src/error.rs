// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for suites and duration records.

/// Errors that can occur when building suites or loading durations.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The duration store JSON is malformed.
    #[error("failed to parse duration store: {0}")]
    Parse(#[from] serde_json::Error),

    /// A test id does not contain exactly one `::` separator.
    #[error("malformed test id '{id}': expected exactly one '::' separator, found {separators}")]
    MalformedId { id: String, separators: usize },

    /// A test id is empty.
    #[error("empty test id at position {position}")]
    EmptyId { position: usize },

    /// The same test id appears more than once in a suite.
    #[error("duplicate test id '{id}'")]
    DuplicateId { id: String },

    /// A recorded duration is negative, NaN or infinite.
    #[error("invalid duration {value} for test '{id}': must be a finite, non-negative number of seconds")]
    InvalidDuration { id: String, value: f64 },
}
