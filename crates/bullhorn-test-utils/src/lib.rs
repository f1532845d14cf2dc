// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for bullhorn integration tests.
//!
//! Provides an in-memory [`MemoryQueue`] implementing the broker contract,
//! a [`MemoryConnector`] that opens such queues, and a [`ScriptedConfirm`]
//! prompt for driving confirmation paths deterministically without a TTY
//! or a running broker.

pub mod memory_queue;
pub mod scripted_confirm;

pub use memory_queue::{MemoryConnector, MemoryQueue};
pub use scripted_confirm::ScriptedConfirm;
