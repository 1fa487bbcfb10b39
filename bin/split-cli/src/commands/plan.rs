// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tsplit plan` command: display the whole split.
//!
//! Prints every group with its size, estimated duration and first test,
//! then compares the configured algorithm against the others on the same
//! inputs.

use split_planner::Algorithm;
use split_runtime::{SplitConfig, SplitReport};

pub async fn execute(config: SplitConfig, json: bool) -> anyhow::Result<()> {
    let splitter = super::load_splitter(config).await?;
    let plan = splitter.plan()?;
    let report = SplitReport::from_plan(&plan);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                 tsplit · Split Plan                  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Inputs ─────────────────────────────────────────────────
    let suite = splitter.suite();
    let relevant = splitter.record().relevant_to(suite).len();
    println!("  Tests:      {}", suite.len());
    println!(
        "  History:    {relevant} of {} tests have recorded durations",
        suite.len(),
    );
    println!("  Algorithm:  {}", plan.algorithm);
    println!("  Grouping:   {}", plan.grouping);
    println!();

    // ── Per-Group Detail ───────────────────────────────────────
    println!(
        "  {:<6} {:>6} {:>12}  {}",
        "Group", "Tests", "Duration", "First test",
    );
    println!("  {}", "-".repeat(72));
    for (index, group) in plan.groups.iter().enumerate() {
        let first = group.selected_ids().next().unwrap_or("-");
        println!(
            "  {:<6} {:>6} {:>11.2}s  {}",
            index,
            group.num_selected(),
            group.duration,
            truncate(first, 44),
        );
    }
    println!();
    println!("  {}", report.summary());
    println!();

    // ── Algorithm Comparison ───────────────────────────────────
    println!("  Algorithm comparison (same inputs):");
    println!(
        "  {:<24} {:>14} {:>10}",
        "Algorithm", "Longest group", "Imbalance",
    );
    println!("  {}", "-".repeat(50));
    for algorithm in Algorithm::ALL {
        let other = SplitReport::from_plan(&splitter.plan_with(algorithm)?);
        println!(
            "  {:<24} {:>13.2}s {:>9.2}x",
            algorithm.name(),
            other.max_duration(),
            other.imbalance(),
        );
    }
    println!();
    Ok(())
}

/// Truncates a string to `max_len` characters with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
