// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client contract for the external queue engine, plus the Redis
//! implementation speaking the Bull key layout.
//!
//! The shell only ever talks to [`QueueHandle`]; [`BullQueue`] is the
//! production implementation, and tests substitute an in-memory one.

pub mod bull;
pub mod events;
pub mod handle;

pub use bull::{BullQueue, RedisConnector, connection_info};
pub use events::QueueEvent;
pub use handle::{AddJobOptions, Connector, DEFAULT_JOB_NAME, JobCounts, JobLogs, QueueHandle};
