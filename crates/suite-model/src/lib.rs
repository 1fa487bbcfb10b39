// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # suite-model
//!
//! The data model shared by the splitter crates:
//!
//! - [`WorkItem`] : a single test, identified by a `<file>::<name>` id.
//! - [`TestSuite`] : the ordered list of items in the current run, with a
//!   **type-state pattern** (`Collected` → `Validated`).
//! - [`DurationRecord`] : historical per-test durations in seconds, loaded
//!   from the JSON duration store.
//!
//! The planner only ever reads these types. Partition results borrow
//! [`WorkItem`]s from the suite instead of owning them.
//!
//! # Example
//! ```
//! use suite_model::{DurationRecord, TestSuite};
//!
//! let suite = TestSuite::parse_id_list("tests/a.py::t1\ntests/b.py::t2\n")
//!     .validate()
//!     .unwrap();
//! let record = DurationRecord::from_json(r#"{"tests/a.py::t1": 2.5}"#).unwrap();
//!
//! assert_eq!(suite.len(), 2);
//! assert_eq!(record.get("tests/a.py::t1"), Some(2.5));
//! ```

mod durations;
mod error;
mod item;
pub mod suite;

pub use durations::DurationRecord;
pub use error::SuiteError;
pub use item::{WorkItem, NODE_ID_SEPARATOR};
pub use suite::TestSuite;
