// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared data model: job states, job views, connection profiles, and
//! batch resolutions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bull job identifiers are strings on the wire (auto-increment counters
/// stringified, or caller-chosen ids).
pub type JobId = String;

/// The five listable job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Waiting,
    Active,
    Completed,
    Failed,
    Delayed,
}

impl JobState {
    pub const ALL: [JobState; 5] = [
        JobState::Waiting,
        JobState::Active,
        JobState::Completed,
        JobState::Failed,
        JobState::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Waiting => "waiting",
            JobState::Active => "active",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::Delayed => "delayed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobState {
    type Err = String;

    /// Accepts the Bull `clean` spelling "wait" as an alias for "waiting".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" | "wait" => Ok(JobState::Waiting),
            "active" => Ok(JobState::Active),
            "completed" => Ok(JobState::Completed),
            "failed" => Ok(JobState::Failed),
            "delayed" => Ok(JobState::Delayed),
            other => Err(format!(
                "unknown status \"{other}\" (expected completed, wait, active, delayed or failed)"
            )),
        }
    }
}

/// Display-ready projection of one job record.
///
/// Derived read-only from the broker at query time, never cached. Field
/// names serialize in camelCase so structured queries match the keys the
/// operator sees in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: JobId,
    pub name: String,
    pub data: Value,
    /// Enqueue timestamp, epoch milliseconds.
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_on: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_on: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    pub attempts_made: u32,
    /// Scheduled delay in milliseconds.
    pub delay: u64,
    pub progress: Value,
}

impl JobView {
    /// Minimal view for a freshly enqueued job.
    pub fn new(id: impl Into<JobId>, name: impl Into<String>, data: Value, time: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data,
            time,
            processed_on: None,
            finished_on: None,
            failed_reason: None,
            stack_trace: None,
            return_value: None,
            attempts_made: 0,
            delay: 0,
            progress: Value::from(0),
        }
    }
}

/// How to reach the broker: a single connection URI, or an explicit
/// host tuple. Exactly one form is authoritative per profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Uri {
        uri: String,
    },
    Host {
        host: String,
        #[serde(default = "default_port")]
        port: u16,
        #[serde(default)]
        db: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cert: Option<String>,
        #[serde(default)]
        accept_unauthorized: bool,
    },
}

fn default_port() -> u16 {
    6379
}

/// A named bundle of connection parameters for one queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// The queue's identifier.
    pub queue: String,
    /// Key prefix shared with the workers, `bull` unless overridden.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub endpoint: Endpoint,
}

fn default_prefix() -> String {
    "bull".to_string()
}

impl ConnectionProfile {
    pub fn from_uri(queue: impl Into<String>, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            prefix: prefix.into(),
            endpoint: Endpoint::Uri { uri: uri.into() },
        }
    }

    /// Human-readable address for connect feedback lines.
    pub fn address(&self) -> String {
        match &self.endpoint {
            Endpoint::Uri { uri } => uri.clone(),
            Endpoint::Host { host, port, .. } => format!("{host}:{port}"),
        }
    }
}

/// Result of resolving a list of job ids: found views and missing ids,
/// each preserving the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResolution {
    pub found: Vec<JobView>,
    pub not_found: Vec<JobId>,
}

impl BatchResolution {
    pub fn len(&self) -> usize {
        self.found.len() + self.not_found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty() && self.not_found.is_empty()
    }
}
