// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # split-runtime
//!
//! Turns a [`SplitConfig`] into the slice of the suite one worker runs.
//!
//! The runtime takes:
//! - A test id list (one id per line) from `suite-model`.
//! - A JSON duration store, also from `suite-model`.
//! - A split count, group index, algorithm and grouping mode.
//!
//! And produces a [`Selection`] for the configured group, or a
//! [`SplitReport`] covering every group.
//!
//! # Type-State Pipeline
//! ```text
//! Splitter<Idle> → Splitter<Loaded>
//! ```
//! Planning is only available once inputs are loaded; the compiler
//! enforces the order.

mod config;
mod error;
mod report;
mod splitter;

pub use config::SplitConfig;
pub use error::RuntimeError;
pub use report::{GroupReport, SplitReport};
pub use splitter::{Idle, Loaded, Selection, Splitter, SplitterState};
