// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The active queue session.
//!
//! At most one queue is connected at a time. A reconnect retires the
//! previous handle (awaited close, listener dropped) before the replacement
//! opens, so two live handles never coexist; event streaming is opt-in per
//! connection and must be re-enabled after a reconnect.

use std::future::Future;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use bullhorn_broker::{QueueEvent, QueueHandle};
use bullhorn_core::{BullhornError, ConnectionProfile};

#[derive(Default)]
pub struct Session {
    handle: Option<Arc<dyn QueueHandle>>,
    profile: Option<ConnectionProfile>,
    listener: Option<EventListener>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire any previous handle, then make the handle produced by `open`
    /// the active session. The old handle is fully closed before `open` is
    /// awaited; if `open` fails the session is left disconnected.
    pub async fn install<F>(
        &mut self,
        open: F,
        profile: ConnectionProfile,
    ) -> Result<(), BullhornError>
    where
        F: Future<Output = Result<Arc<dyn QueueHandle>, BullhornError>>,
    {
        self.listener = None;
        self.profile = None;
        if let Some(old) = self.handle.take() {
            debug!(queue = old.queue_name(), "closing previous session");
            old.close().await?;
        }
        self.handle = Some(open.await?);
        self.profile = Some(profile);
        Ok(())
    }

    /// The active handle, or [`BullhornError::NoSession`] when nothing is
    /// connected or the connection is no longer ready.
    pub async fn current(&self) -> Result<Arc<dyn QueueHandle>, BullhornError> {
        let handle = self.handle.as_ref().ok_or(BullhornError::NoSession)?;
        if !handle.is_ready().await {
            return Err(BullhornError::NoSession);
        }
        Ok(Arc::clone(handle))
    }

    pub fn profile(&self) -> Option<&ConnectionProfile> {
        self.profile.as_ref()
    }

    /// `(prefix, queue)` of the active session, for the prompt.
    pub fn descriptor(&self) -> Option<(String, String)> {
        self.profile
            .as_ref()
            .map(|p| (p.prefix.clone(), p.queue.clone()))
    }

    pub fn events_enabled(&self) -> bool {
        self.listener.is_some()
    }

    /// Start streaming queue events to stdout. Returns `false` when a
    /// listener is already running.
    pub async fn enable_events(&mut self) -> Result<bool, BullhornError> {
        if self.listener.is_some() {
            return Ok(false);
        }
        let handle = self.current().await?;
        let events = handle.subscribe_events().await?;
        self.listener = Some(EventListener::spawn(events));
        Ok(true)
    }

    /// Stop streaming events. Returns `false` when no listener was running.
    pub fn disable_events(&mut self) -> bool {
        self.listener.take().is_some()
    }

    /// Tear the session down on shell exit.
    pub async fn shutdown(&mut self) -> Result<(), BullhornError> {
        self.listener = None;
        if let Some(handle) = self.handle.take() {
            handle.close().await?;
        }
        self.profile = None;
        Ok(())
    }
}

/// Background task printing queue events as they arrive. Dropping the
/// listener aborts the task, which closes the receiver and lets the broker
/// side unsubscribe.
struct EventListener {
    task: JoinHandle<()>,
}

impl EventListener {
    fn spawn(mut events: mpsc::Receiver<QueueEvent>) -> Self {
        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                println!("{}", format!("[event] {event}").cyan());
            }
        });
        Self { task }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}
