// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle events published by the queue.
//!
//! Bull publishes one pub/sub channel per event under the queue's key
//! prefix (`bull:mailer:completed` and so on); payloads carry the job id
//! followed by an optional detail after the first comma.

use std::fmt;

use bullhorn_core::JobId;

/// One lifecycle event observed on the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    Active { id: JobId },
    Waiting { id: JobId },
    Completed { id: JobId, result: String },
    Failed { id: JobId, reason: String },
    Stalled { id: JobId },
    Progress { id: JobId, progress: String },
    Delayed { id: JobId },
    Removed { id: JobId },
    Drained,
    Paused,
    Resumed,
}

impl QueueEvent {
    /// Parses a channel suffix plus payload into an event. Unknown
    /// channels (including plain job-key traffic) yield `None`.
    pub fn parse(kind: &str, payload: &str) -> Option<QueueEvent> {
        let (id, detail) = match payload.split_once(',') {
            Some((id, rest)) => (id.to_string(), rest.to_string()),
            None => (payload.to_string(), String::new()),
        };
        match kind {
            "active" => Some(QueueEvent::Active { id }),
            "waiting" => Some(QueueEvent::Waiting { id }),
            "completed" => Some(QueueEvent::Completed { id, result: detail }),
            "failed" => Some(QueueEvent::Failed { id, reason: detail }),
            "stalled" => Some(QueueEvent::Stalled { id }),
            "progress" => Some(QueueEvent::Progress { id, progress: detail }),
            "delayed" => Some(QueueEvent::Delayed { id }),
            "removed" => Some(QueueEvent::Removed { id }),
            "drained" => Some(QueueEvent::Drained),
            "paused" => Some(QueueEvent::Paused),
            "resumed" => Some(QueueEvent::Resumed),
            _ => None,
        }
    }
}

impl fmt::Display for QueueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueEvent::Active { id } => write!(f, "job \"{id}\" started"),
            QueueEvent::Waiting { id } => write!(f, "job \"{id}\" waiting"),
            QueueEvent::Completed { id, result } if result.is_empty() => {
                write!(f, "job \"{id}\" completed")
            }
            QueueEvent::Completed { id, result } => {
                write!(f, "job \"{id}\" completed, result: {result}")
            }
            QueueEvent::Failed { id, reason } if reason.is_empty() => {
                write!(f, "job \"{id}\" failed")
            }
            QueueEvent::Failed { id, reason } => write!(f, "job \"{id}\" failed: {reason}"),
            QueueEvent::Stalled { id } => write!(f, "job \"{id}\" stalled"),
            QueueEvent::Progress { id, progress } => {
                write!(f, "job \"{id}\" progress: {progress}")
            }
            QueueEvent::Delayed { id } => write!(f, "job \"{id}\" delayed"),
            QueueEvent::Removed { id } => write!(f, "job \"{id}\" removed"),
            QueueEvent::Drained => write!(f, "queue drained"),
            QueueEvent::Paused => write!(f, "queue paused"),
            QueueEvent::Resumed => write!(f, "queue resumed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_only_events() {
        assert_eq!(
            QueueEvent::parse("active", "5"),
            Some(QueueEvent::Active { id: "5".into() })
        );
        assert_eq!(
            QueueEvent::parse("removed", "5"),
            Some(QueueEvent::Removed { id: "5".into() })
        );
        assert_eq!(QueueEvent::parse("drained", ""), Some(QueueEvent::Drained));
    }

    #[test]
    fn parses_detail_after_first_comma() {
        assert_eq!(
            QueueEvent::parse("failed", "5,connection reset, twice"),
            Some(QueueEvent::Failed {
                id: "5".into(),
                reason: "connection reset, twice".into()
            })
        );
        assert_eq!(
            QueueEvent::parse("completed", "9,{\"ok\":true}"),
            Some(QueueEvent::Completed {
                id: "9".into(),
                result: "{\"ok\":true}".into()
            })
        );
    }

    #[test]
    fn unknown_channels_are_ignored() {
        assert_eq!(QueueEvent::parse("5", "whatever"), None);
        assert_eq!(QueueEvent::parse("meta-paused", ""), None);
    }

    #[test]
    fn display_is_one_line() {
        let event = QueueEvent::Failed {
            id: "5".into(),
            reason: "timeout".into(),
        };
        assert_eq!(event.to_string(), "job \"5\" failed: timeout");
        assert!(!QueueEvent::Drained.to_string().contains('\n'));
    }
}
