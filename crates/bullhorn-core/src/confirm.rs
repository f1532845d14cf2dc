// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confirmation prompt seam for destructive commands.

use async_trait::async_trait;

use crate::error::BullhornError;

/// Asks the operator a yes/no question before a state-changing operation.
///
/// The shell provides a TTY implementation; tests script the answers.
/// Only an exact `y` answer affirms -- anything else cancels.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, question: &str) -> Result<bool, BullhornError>;
}
