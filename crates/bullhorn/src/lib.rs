// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive shell for Bull job queues.
//!
//! The binary wires a [`shell`] read-eval loop over a [`session::Session`]
//! holding the active queue handle. Commands live under [`commands`], with
//! the listing pipeline in [`listing`] and job resolution in [`lookup`].

pub mod commands;
pub mod config;
pub mod display;
pub mod listing;
pub mod lookup;
pub mod registry;
pub mod session;
pub mod shell;
