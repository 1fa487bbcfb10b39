// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tsplit slowest` command: list the slowest recorded tests.

use anyhow::Context;
use std::path::PathBuf;
use suite_model::DurationRecord;

pub async fn execute(durations: PathBuf, count: usize) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(&durations)
        .await
        .with_context(|| format!("cannot read duration store '{}'", durations.display()))?;
    let record = DurationRecord::from_json(&json)?;

    let slowest = record.slowest(count);
    if slowest.is_empty() {
        println!("No durations recorded in '{}'.", durations.display());
        return Ok(());
    }

    println!("  {:>4}  {:>10}  Test", "#", "Seconds");
    println!("  {}", "-".repeat(60));
    for (rank, (id, seconds)) in slowest.iter().enumerate() {
        println!("  {:>4}  {:>10.3}  {id}", rank + 1, seconds);
    }
    println!();
    println!(
        "  {} of {} tests shown, {:.2}s recorded in total",
        slowest.len(),
        record.len(),
        record.total_seconds(),
    );
    Ok(())
}
