// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch.
//!
//! Every command runs through the same shape: check the session
//! precondition if it needs one, validate arguments, ask for confirmation
//! when the command mutates, execute, report. Cancellation is an outcome,
//! not an error, so a declined prompt never trips the error reporter.

pub mod cli;

mod connect;
mod jobs;
mod queue;

use std::sync::Arc;

use bullhorn_broker::Connector;
use bullhorn_core::{BullhornError, Confirm, JobState};

use crate::config::BullhornConfig;
use crate::registry::ConnectionRegistry;
use crate::session::Session;

pub use cli::{AddArgs, CleanArgs, ConnectArgs, ListArgs, ShellCommand, ShellLine};

/// How a completed command should be reported.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A mutation succeeded; the message is highlighted.
    Done(String),
    /// A read-only command finished; empty messages print nothing.
    Info(String),
    /// The operator declined a confirmation prompt.
    Cancelled,
    /// Leave the shell.
    Exit,
}

/// Everything a command needs. The connector and confirmer are trait
/// objects so tests can run the full dispatch path in memory.
pub struct ShellContext {
    pub config: BullhornConfig,
    pub session: Session,
    pub registry: ConnectionRegistry,
    pub connector: Arc<dyn Connector>,
    pub confirm: Arc<dyn Confirm>,
}

impl ShellContext {
    pub fn new(
        config: BullhornConfig,
        connector: Arc<dyn Connector>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let registry = ConnectionRegistry::open(config.registry_path());
        Self {
            config,
            session: Session::new(),
            registry,
            connector,
            confirm,
        }
    }
}

pub async fn dispatch(
    ctx: &mut ShellContext,
    command: ShellCommand,
) -> Result<CommandOutcome, BullhornError> {
    match command {
        ShellCommand::Connect(args) => connect::connect(ctx, args).await,
        ShellCommand::ConnectList => connect::connect_list(ctx),
        ShellCommand::ConnectSave { name } => connect::connect_save(ctx, &name),
        ShellCommand::ConnectRm { name } => connect::connect_rm(ctx, &name),
        ShellCommand::ConnectTo { name } => connect::connect_to(ctx, &name).await,
        ShellCommand::Stats => queue::stats(ctx).await,
        ShellCommand::Active(args) => queue::list_state(ctx, JobState::Active, args).await,
        ShellCommand::Waiting(args) => queue::list_state(ctx, JobState::Waiting, args).await,
        ShellCommand::Completed(args) => queue::list_state(ctx, JobState::Completed, args).await,
        ShellCommand::Failed(args) => queue::list_state(ctx, JobState::Failed, args).await,
        ShellCommand::Delayed(args) => queue::list_state(ctx, JobState::Delayed, args).await,
        ShellCommand::Get { job_ids } => jobs::get(ctx, &job_ids).await,
        ShellCommand::Add(args) => jobs::add(ctx, args).await,
        ShellCommand::Rm { job_ids, yes } => {
            jobs::batch(ctx, jobs::MutateOp::Remove, &job_ids, yes).await
        }
        ShellCommand::Retry { job_ids, yes } => {
            jobs::batch(ctx, jobs::MutateOp::Retry, &job_ids, yes).await
        }
        ShellCommand::RetryFailed { yes } => jobs::retry_failed(ctx, yes).await,
        ShellCommand::Promote { job_ids, yes } => {
            jobs::batch(ctx, jobs::MutateOp::Promote, &job_ids, yes).await
        }
        ShellCommand::Fail {
            job_id,
            reason,
            yes,
        } => jobs::fail(ctx, &job_id, &reason, yes).await,
        ShellCommand::Complete { job_id, data, yes } => {
            jobs::complete(ctx, &job_id, &data, yes).await
        }
        ShellCommand::Clean(args) => queue::clean(ctx, args).await,
        ShellCommand::Logs { job_id, start, end } => jobs::logs(ctx, &job_id, start, end).await,
        ShellCommand::Log { job_id, data, yes } => jobs::log(ctx, &job_id, &data, yes).await,
        ShellCommand::Pause { yes } => queue::pause(ctx, yes).await,
        ShellCommand::Resume { yes } => queue::resume(ctx, yes).await,
        ShellCommand::EventsOn => queue::events_on(ctx).await,
        ShellCommand::EventsOff => queue::events_off(ctx),
        ShellCommand::Exit => Ok(CommandOutcome::Exit),
    }
}

/// Ask for confirmation unless `-y` was given. Only an exact `y` affirms.
pub(crate) async fn confirmed(
    ctx: &ShellContext,
    skip: bool,
    question: &str,
) -> Result<bool, BullhornError> {
    if skip {
        return Ok(true);
    }
    ctx.confirm.confirm(question).await
}
