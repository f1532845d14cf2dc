// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duration parsing for `--time-ago` windows and `clean` periods.

use std::time::Duration;

use crate::error::BullhornError;

/// Parses a duration string such as `"2h"`, `"30m"`, `"1d"` or `"1h 30m"`.
/// A bare integer is taken as milliseconds.
pub fn parse_duration(input: &str) -> Result<Duration, BullhornError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BullhornError::Validation("empty duration".into()));
    }
    if let Ok(millis) = trimmed.parse::<u64>() {
        return Ok(Duration::from_millis(millis));
    }
    humantime::parse_duration(trimmed)
        .map_err(|e| BullhornError::Validation(format!("invalid duration \"{trimmed}\": {e}")))
}

/// Milliseconds in a duration, saturating at `u64::MAX`.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
