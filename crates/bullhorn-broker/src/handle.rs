// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The queue-engine client contract.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use bullhorn_core::{BullhornError, ConnectionProfile, JobId, JobState, JobView};

use crate::events::QueueEvent;

/// Name Bull assigns to unnamed jobs.
pub const DEFAULT_JOB_NAME: &str = "__default__";

/// Job counts per state, as reported by `stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounts {
    pub waiting: u64,
    pub active: u64,
    pub completed: u64,
    pub failed: u64,
    pub delayed: u64,
    pub paused: u64,
}

/// Optional enqueue parameters. Absent fields are not forwarded, so the
/// backend's own defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddJobOptions {
    pub job_id: Option<String>,
    pub priority: Option<i64>,
    pub delay_ms: Option<u64>,
    pub attempts: Option<u32>,
    pub repeat_every_ms: Option<u64>,
    pub lifo: bool,
}

/// One page of a job's log rows plus the total row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobLogs {
    pub rows: Vec<String>,
    pub total: u64,
}

/// An open client connection to one queue.
///
/// All operations are point-in-time reads or single mutations; nothing is
/// cached. Page indices are zero-based and inclusive of `end`; negative
/// indices count from the tail, as the backend does.
#[async_trait]
pub trait QueueHandle: Send + Sync {
    fn queue_name(&self) -> &str;

    fn prefix(&self) -> &str;

    /// Readiness probe. A handle that stops reporting ready is treated by
    /// the session as equivalent to no handle at all.
    async fn is_ready(&self) -> bool;

    async fn get_job(&self, id: &str) -> Result<Option<JobView>, BullhornError>;

    async fn jobs_in_state(
        &self,
        state: JobState,
        start: i64,
        end: i64,
    ) -> Result<Vec<JobView>, BullhornError>;

    async fn job_counts(&self) -> Result<JobCounts, BullhornError>;

    async fn pause(&self) -> Result<(), BullhornError>;

    async fn resume(&self) -> Result<(), BullhornError>;

    /// Removes jobs in `status` that finished (or were enqueued) more than
    /// `grace_ms` ago. `limit` of `None` cleans everything matching.
    async fn clean(
        &self,
        grace_ms: u64,
        status: JobState,
        limit: Option<u64>,
    ) -> Result<Vec<JobId>, BullhornError>;

    async fn add_job(
        &self,
        name: &str,
        data: Value,
        opts: AddJobOptions,
    ) -> Result<JobId, BullhornError>;

    async fn remove_job(&self, id: &str) -> Result<(), BullhornError>;

    async fn retry_job(&self, id: &str) -> Result<(), BullhornError>;

    async fn promote_job(&self, id: &str) -> Result<(), BullhornError>;

    async fn fail_job(&self, id: &str, reason: &str) -> Result<(), BullhornError>;

    async fn complete_job(&self, id: &str, return_value: Value) -> Result<(), BullhornError>;

    async fn append_log(&self, id: &str, row: &str) -> Result<(), BullhornError>;

    async fn job_logs(&self, id: &str, start: i64, end: i64) -> Result<JobLogs, BullhornError>;

    /// Subscribes to the queue's lifecycle event stream. The subscription
    /// lives until the receiver is dropped.
    async fn subscribe_events(&self) -> Result<mpsc::Receiver<QueueEvent>, BullhornError>;

    /// Releases the connection. Awaited by the session before the handle
    /// is replaced or on shutdown.
    async fn close(&self) -> Result<(), BullhornError>;
}

/// Opens queue handles from connection profiles. The shell uses the Redis
/// connector; tests substitute one backed by an in-memory queue.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(
        &self,
        profile: &ConnectionProfile,
    ) -> Result<std::sync::Arc<dyn QueueHandle>, BullhornError>;
}
