// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partition strategies.
//!
//! Every strategy is a plain function with the [`SplitFn`] signature: it
//! receives the split count and the ordered work units, and returns
//! exactly one [`OutputTestGroup`] per bucket.
//!
//! Strategies are purely algorithmic: no I/O, no shared state, no
//! randomness. Each worker recomputes the whole split independently and
//! keeps only its own bucket, so identical inputs must give identical
//! outputs on every machine. All tie-breaks therefore go through explicit
//! secondary keys, never through iteration or insertion order.

pub mod duration_chunks;
pub mod least_duration;

use crate::{InputTestGroup, OutputTestGroup, SplitCount};

/// Signature shared by all partition strategies.
pub type SplitFn = for<'a> fn(SplitCount, &[InputTestGroup<'a>]) -> Vec<OutputTestGroup<'a>>;
