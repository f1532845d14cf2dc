// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering helpers for the shell.

use colored::Colorize;

use bullhorn_broker::{JobCounts, JobLogs};
use bullhorn_core::{BullhornError, JobId, JobView};

/// Pretty-print a page of jobs as a JSON array.
pub fn print_jobs(views: &[JobView]) {
    match serde_json::to_string_pretty(views) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => println!("{}", format!("render error: {e}").red()),
    }
}

/// Aligned per-state count table.
pub fn print_counts(counts: &JobCounts) {
    let rows = [
        ("waiting", counts.waiting),
        ("active", counts.active),
        ("completed", counts.completed),
        ("failed", counts.failed),
        ("delayed", counts.delayed),
        ("paused", counts.paused),
    ];
    println!("{:<10} {:>8}", "state".bold(), "count".bold());
    for (state, count) in rows {
        println!("{state:<10} {count:>8}");
    }
}

pub fn print_logs(logs: &JobLogs) {
    for row in &logs.rows {
        println!("{row}");
    }
    println!("{}", format!("{} row(s) total", logs.total).dimmed());
}

pub fn warn_line(message: &str) {
    println!("{}", message.yellow());
}

/// Single reporting boundary for command failures. Operator mistakes show
/// as warnings; infrastructure failures as errors.
pub fn report_error(error: &BullhornError) {
    if error.is_user_facing() {
        println!("{}", error.to_string().yellow());
    } else {
        println!("{}", format!("error: {error}").red());
    }
}

/// `"1", "2", "3"` style id list for result lines.
pub fn quote_join(ids: &[JobId]) -> String {
    ids.iter()
        .map(|id| format!("\"{id}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_join_renders_comma_separated_quoted_ids() {
        let ids = vec!["1".to_string(), "7".to_string()];
        assert_eq!(quote_join(&ids), r#""1", "7""#);
        assert_eq!(quote_join(&[]), "");
    }
}
