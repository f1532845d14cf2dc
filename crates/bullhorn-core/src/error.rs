// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the bullhorn queue shell.

use thiserror::Error;

/// The primary error type used across all bullhorn crates.
///
/// Cancellation of a confirmation prompt is deliberately *not* an error;
/// command handlers return it as a distinguished outcome variant instead.
#[derive(Debug, Error)]
pub enum BullhornError {
    /// No queue session exists; `connect` has not succeeded yet, or the
    /// current handle no longer reports ready.
    #[error("no active session, connect to a queue first")]
    NoSession,

    /// A job id did not resolve against the active queue.
    #[error("job \"{0}\" not found")]
    JobNotFound(String),

    /// A saved connection name did not resolve in the registry.
    #[error("connection \"{0}\" not found")]
    ProfileNotFound(String),

    /// The reserved last-used name was passed to save/remove.
    #[error("\"{0}\" is a reserved connection name")]
    ReservedName(String),

    /// Malformed user input (bad JSON, bad duration, invalid status,
    /// inverted pagination). Caught before any backend call.
    #[error("{0}")]
    Validation(String),

    /// Broker-side failure surfaced from an awaited queue operation.
    #[error("broker error: {message}")]
    Broker {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection registry persistence failure (file I/O, TOML).
    #[error("registry error: {source}")]
    Registry {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BullhornError {
    /// Broker error from a message only, with no underlying source.
    pub fn broker(message: impl Into<String>) -> Self {
        Self::Broker {
            message: message.into(),
            source: None,
        }
    }

    /// True for conditions caused by operator input or missing state,
    /// reported in warning style rather than as hard failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NoSession
                | Self::JobNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::ReservedName(_)
                | Self::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_classification() {
        assert!(BullhornError::NoSession.is_user_facing());
        assert!(BullhornError::JobNotFound("7".into()).is_user_facing());
        assert!(BullhornError::Validation("bad".into()).is_user_facing());
        assert!(!BullhornError::broker("boom").is_user_facing());
        assert!(!BullhornError::Internal("oops".into()).is_user_facing());
    }

    #[test]
    fn display_names_the_subject() {
        let e = BullhornError::JobNotFound("42".into());
        assert_eq!(e.to_string(), "job \"42\" not found");
        let e = BullhornError::ReservedName("__last-used__".into());
        assert!(e.to_string().contains("reserved"));
    }
}
