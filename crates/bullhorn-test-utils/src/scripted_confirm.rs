// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted confirmation prompt for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bullhorn_core::{BullhornError, Confirm};

/// Answers confirmation prompts from a fixed script and records the
/// questions asked.
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Accept everything.
    pub fn always_yes() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub async fn questions(&self) -> Vec<String> {
        self.asked.lock().await.clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, question: &str) -> Result<bool, BullhornError> {
        self.asked.lock().await.push(question.to_string());
        // An exhausted script affirms, so `always_yes` needs no answers.
        Ok(self.answers.lock().await.pop_front().unwrap_or(true))
    }
}
