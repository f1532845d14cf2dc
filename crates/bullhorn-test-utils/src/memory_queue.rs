// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory queue mock for deterministic testing.
//!
//! `MemoryQueue` implements `QueueHandle` over a mutex-guarded map. Every
//! trait call is recorded by name so tests can assert that validation
//! failures never reach the backend; per-id mutation failures can be
//! injected to exercise partial-failure reporting.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};

use bullhorn_broker::{AddJobOptions, Connector, JobCounts, JobLogs, QueueEvent, QueueHandle};
use bullhorn_core::{BullhornError, ConnectionProfile, JobId, JobState, JobView};

struct StoredJob {
    view: JobView,
    state: JobState,
    logs: Vec<String>,
    seq: u64,
}

#[derive(Default)]
struct MemoryState {
    jobs: HashMap<JobId, StoredJob>,
    next_id: u64,
    next_seq: u64,
    paused: bool,
    last_add_opts: Option<AddJobOptions>,
}

/// An in-memory queue for testing.
pub struct MemoryQueue {
    queue: String,
    prefix: String,
    ready: AtomicBool,
    close_calls: AtomicUsize,
    state: Mutex<MemoryState>,
    subscribers: Mutex<Vec<mpsc::Sender<QueueEvent>>>,
    calls: Mutex<Vec<String>>,
    fail_ids: Mutex<HashSet<JobId>>,
}

impl MemoryQueue {
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            prefix: "bull".into(),
            ready: AtomicBool::new(true),
            close_calls: AtomicUsize::new(0),
            state: Mutex::new(MemoryState::default()),
            subscribers: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Seeds one job in the given state, preserving insertion order.
    pub async fn seed(&self, state: JobState, view: JobView) {
        let mut inner = self.state.lock().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.jobs.insert(
            view.id.clone(),
            StoredJob {
                view,
                state,
                logs: Vec::new(),
                seq,
            },
        );
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Makes every mutation against `id` fail with a broker error.
    pub async fn fail_mutations_for(&self, id: impl Into<JobId>) {
        self.fail_ids.lock().await.insert(id.into());
    }

    /// Names of all trait calls made so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|name| name.as_str() == op)
            .count()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    /// Subscriptions whose receiver is still alive.
    pub async fn active_subscriptions(&self) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    /// Delivers an event to every live subscriber.
    pub async fn emit(&self, event: QueueEvent) {
        let subscribers = self.subscribers.lock().await;
        for tx in subscribers.iter() {
            let _ = tx.send(event.clone()).await;
        }
    }

    pub async fn job_state(&self, id: &str) -> Option<JobState> {
        self.state.lock().await.jobs.get(id).map(|job| job.state)
    }

    pub async fn job_log_rows(&self, id: &str) -> Vec<String> {
        self.state
            .lock()
            .await
            .jobs
            .get(id)
            .map(|job| job.logs.clone())
            .unwrap_or_default()
    }

    /// Options passed to the most recent `add_job` call.
    pub async fn last_add_opts(&self) -> Option<AddJobOptions> {
        self.state.lock().await.last_add_opts.clone()
    }

    async fn record(&self, op: &str) {
        self.calls.lock().await.push(op.to_string());
    }

    async fn check_injected_failure(&self, id: &str) -> Result<(), BullhornError> {
        if self.fail_ids.lock().await.contains(id) {
            return Err(BullhornError::broker(format!(
                "injected failure for job \"{id}\""
            )));
        }
        Ok(())
    }
}

/// Resolves a zero-based inclusive page (negative `end` counts from the
/// tail) against a slice length.
fn page_bounds(start: i64, end: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;
    let end = if end < 0 { len + end } else { end.min(len - 1) };
    if start > end || end < 0 || start >= len {
        return None;
    }
    Some((start.max(0) as usize, end as usize))
}

#[async_trait]
impl QueueHandle for MemoryQueue {
    fn queue_name(&self) -> &str {
        &self.queue
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn get_job(&self, id: &str) -> Result<Option<JobView>, BullhornError> {
        self.record("get_job").await;
        Ok(self
            .state
            .lock()
            .await
            .jobs
            .get(id)
            .map(|job| job.view.clone()))
    }

    async fn jobs_in_state(
        &self,
        state: JobState,
        start: i64,
        end: i64,
    ) -> Result<Vec<JobView>, BullhornError> {
        self.record("jobs_in_state").await;
        let inner = self.state.lock().await;
        let mut jobs: Vec<(u64, JobView)> = inner
            .jobs
            .values()
            .filter(|job| job.state == state)
            .map(|job| (job.seq, job.view.clone()))
            .collect();
        jobs.sort_by_key(|(seq, _)| *seq);
        let views: Vec<JobView> = jobs.into_iter().map(|(_, view)| view).collect();
        Ok(match page_bounds(start, end, views.len()) {
            Some((lo, hi)) => views[lo..=hi].to_vec(),
            None => Vec::new(),
        })
    }

    async fn job_counts(&self) -> Result<JobCounts, BullhornError> {
        self.record("job_counts").await;
        let inner = self.state.lock().await;
        let mut counts = JobCounts::default();
        for job in inner.jobs.values() {
            match job.state {
                JobState::Waiting => counts.waiting += 1,
                JobState::Active => counts.active += 1,
                JobState::Completed => counts.completed += 1,
                JobState::Failed => counts.failed += 1,
                JobState::Delayed => counts.delayed += 1,
            }
        }
        Ok(counts)
    }

    async fn pause(&self) -> Result<(), BullhornError> {
        self.record("pause").await;
        self.state.lock().await.paused = true;
        self.emit(QueueEvent::Paused).await;
        Ok(())
    }

    async fn resume(&self) -> Result<(), BullhornError> {
        self.record("resume").await;
        self.state.lock().await.paused = false;
        self.emit(QueueEvent::Resumed).await;
        Ok(())
    }

    async fn clean(
        &self,
        grace_ms: u64,
        status: JobState,
        limit: Option<u64>,
    ) -> Result<Vec<JobId>, BullhornError> {
        self.record("clean").await;
        let threshold =
            chrono::Utc::now().timestamp_millis() - i64::try_from(grace_ms).unwrap_or(i64::MAX);
        let mut inner = self.state.lock().await;
        let mut matching: Vec<(u64, JobId)> = inner
            .jobs
            .values()
            .filter(|job| {
                job.state == status && job.view.finished_on.unwrap_or(job.view.time) <= threshold
            })
            .map(|job| (job.seq, job.view.id.clone()))
            .collect();
        matching.sort_by_key(|(seq, _)| *seq);
        let mut cleaned = Vec::new();
        for (_, id) in matching {
            if let Some(limit) = limit {
                if cleaned.len() as u64 >= limit {
                    break;
                }
            }
            inner.jobs.remove(&id);
            cleaned.push(id);
        }
        Ok(cleaned)
    }

    async fn add_job(
        &self,
        name: &str,
        data: Value,
        opts: AddJobOptions,
    ) -> Result<JobId, BullhornError> {
        self.record("add_job").await;
        let mut inner = self.state.lock().await;
        let id = match &opts.job_id {
            Some(id) => id.clone(),
            None => {
                inner.next_id += 1;
                inner.next_id.to_string()
            }
        };
        let mut view = JobView::new(id.clone(), name, data, chrono::Utc::now().timestamp_millis());
        view.delay = opts.delay_ms.unwrap_or(0);
        let state = if view.delay > 0 {
            JobState::Delayed
        } else {
            JobState::Waiting
        };
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.jobs.insert(
            id.clone(),
            StoredJob {
                view,
                state,
                logs: Vec::new(),
                seq,
            },
        );
        inner.last_add_opts = Some(opts);
        Ok(id)
    }

    async fn remove_job(&self, id: &str) -> Result<(), BullhornError> {
        self.record("remove_job").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        if inner.jobs.remove(id).is_none() {
            return Err(BullhornError::JobNotFound(id.to_string()));
        }
        drop(inner);
        self.emit(QueueEvent::Removed { id: id.to_string() }).await;
        Ok(())
    }

    async fn retry_job(&self, id: &str) -> Result<(), BullhornError> {
        self.record("retry_job").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        let job = inner
            .jobs
            .get_mut(id)
            .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))?;
        if job.state != JobState::Failed {
            return Err(BullhornError::broker(format!(
                "job \"{id}\" is not in the failed state"
            )));
        }
        job.state = JobState::Waiting;
        job.view.failed_reason = None;
        job.view.finished_on = None;
        Ok(())
    }

    async fn promote_job(&self, id: &str) -> Result<(), BullhornError> {
        self.record("promote_job").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        let job = inner
            .jobs
            .get_mut(id)
            .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))?;
        if job.state != JobState::Delayed {
            return Err(BullhornError::broker(format!(
                "job \"{id}\" is not in the delayed state"
            )));
        }
        job.state = JobState::Waiting;
        job.view.delay = 0;
        Ok(())
    }

    async fn fail_job(&self, id: &str, reason: &str) -> Result<(), BullhornError> {
        self.record("fail_job").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        let job = inner
            .jobs
            .get_mut(id)
            .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))?;
        job.state = JobState::Failed;
        job.view.failed_reason = Some(reason.to_string());
        job.view.finished_on = Some(chrono::Utc::now().timestamp_millis());
        Ok(())
    }

    async fn complete_job(&self, id: &str, return_value: Value) -> Result<(), BullhornError> {
        self.record("complete_job").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        let job = inner
            .jobs
            .get_mut(id)
            .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))?;
        job.state = JobState::Completed;
        job.view.return_value = Some(return_value);
        job.view.finished_on = Some(chrono::Utc::now().timestamp_millis());
        Ok(())
    }

    async fn append_log(&self, id: &str, row: &str) -> Result<(), BullhornError> {
        self.record("append_log").await;
        self.check_injected_failure(id).await?;
        let mut inner = self.state.lock().await;
        let job = inner
            .jobs
            .get_mut(id)
            .ok_or_else(|| BullhornError::JobNotFound(id.to_string()))?;
        job.logs.push(row.to_string());
        Ok(())
    }

    async fn job_logs(&self, id: &str, start: i64, end: i64) -> Result<JobLogs, BullhornError> {
        self.record("job_logs").await;
        let inner = self.state.lock().await;
        let logs = inner
            .jobs
            .get(id)
            .map(|job| job.logs.clone())
            .unwrap_or_default();
        let total = logs.len() as u64;
        let rows = match page_bounds(start, end, logs.len()) {
            Some((lo, hi)) => logs[lo..=hi].to_vec(),
            None => Vec::new(),
        };
        Ok(JobLogs { rows, total })
    }

    async fn subscribe_events(&self) -> Result<mpsc::Receiver<QueueEvent>, BullhornError> {
        self.record("subscribe_events").await;
        let (tx, rx) = mpsc::channel(16);
        self.subscribers.lock().await.push(tx);
        Ok(rx)
    }

    async fn close(&self) -> Result<(), BullhornError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.ready.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Connector that opens fresh `MemoryQueue` handles and keeps every handle
/// it has opened for later inspection.
#[derive(Default)]
pub struct MemoryConnector {
    opened: Mutex<Vec<(ConnectionProfile, Arc<MemoryQueue>)>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open_count(&self) -> usize {
        self.opened.lock().await.len()
    }

    /// The handle produced by the most recent `open`.
    pub async fn last_handle(&self) -> Option<Arc<MemoryQueue>> {
        self.opened.lock().await.last().map(|(_, q)| q.clone())
    }

    pub async fn last_profile(&self) -> Option<ConnectionProfile> {
        self.opened.lock().await.last().map(|(p, _)| p.clone())
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn open(
        &self,
        profile: &ConnectionProfile,
    ) -> Result<Arc<dyn QueueHandle>, BullhornError> {
        let handle = Arc::new(MemoryQueue::new(profile.queue.clone()));
        self.opened
            .lock()
            .await
            .push((profile.clone(), handle.clone()));
        Ok(handle)
    }
}
