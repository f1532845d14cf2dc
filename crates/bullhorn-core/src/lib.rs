// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the bullhorn queue shell.
//!
//! This crate provides the shared error type, the data model used by every
//! command (job views, connection profiles, batch resolutions), duration
//! parsing for `--time-ago` / `clean` periods, and the structured query
//! matcher applied to job listings.

pub mod confirm;
pub mod duration;
pub mod error;
pub mod query;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use confirm::Confirm;
pub use duration::{duration_ms, parse_duration};
pub use error::BullhornError;
pub use query::Query;
pub use types::{BatchResolution, ConnectionProfile, Endpoint, JobId, JobState, JobView};
