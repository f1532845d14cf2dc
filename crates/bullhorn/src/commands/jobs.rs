// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job-level commands: fetch, add, and the lifecycle mutations.

use std::sync::Arc;

use futures::future;
use serde_json::Value;

use bullhorn_broker::{AddJobOptions, QueueHandle, DEFAULT_JOB_NAME};
use bullhorn_core::{BullhornError, JobId, JobState};

use crate::commands::{confirmed, AddArgs, CommandOutcome, ShellContext};
use crate::display;
use crate::lookup::{resolve_many, resolve_one};

pub(super) async fn get(
    ctx: &mut ShellContext,
    ids: &[String],
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let resolution = resolve_many(&handle, ids).await?;
    for id in &resolution.not_found {
        display::warn_line(&format!("job \"{id}\" not found"));
    }
    if !resolution.found.is_empty() {
        display::print_jobs(&resolution.found);
    }
    Ok(CommandOutcome::Info(format!(
        "{} of {} job(s) found",
        resolution.found.len(),
        resolution.len()
    )))
}

pub(super) async fn add(
    ctx: &mut ShellContext,
    args: AddArgs,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let data: Value = serde_json::from_str(&args.data)
        .map_err(|_| BullhornError::Validation("\"data\" is not valid JSON".to_string()))?;
    if !confirmed(ctx, args.yes, "Add? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    let name = args.name.as_deref().unwrap_or(DEFAULT_JOB_NAME);
    let opts = AddJobOptions {
        job_id: args.job_id,
        priority: args.priority,
        delay_ms: args.delay,
        attempts: args.attempts,
        repeat_every_ms: args.repeat,
        lifo: args.lifo,
    };
    let id = handle.add_job(name, data, opts).await?;
    Ok(CommandOutcome::Done(match &args.name {
        Some(name) => format!("Job \"{id}\" added with name \"{name}\""),
        None => format!("Job \"{id}\" added"),
    }))
}

/// The three mutations that act on a batch of ids.
#[derive(Debug, Clone, Copy)]
pub(super) enum MutateOp {
    Remove,
    Retry,
    Promote,
}

impl MutateOp {
    fn question(self) -> &'static str {
        match self {
            Self::Remove => "Remove? (y/n): ",
            Self::Retry => "Retry? (y/n): ",
            Self::Promote => "Promote? (y/n): ",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Remove => "removed",
            Self::Retry => "retried",
            Self::Promote => "promoted",
        }
    }

    async fn apply(self, handle: &Arc<dyn QueueHandle>, id: &str) -> Result<(), BullhornError> {
        match self {
            Self::Remove => handle.remove_job(id).await,
            Self::Retry => handle.retry_job(id).await,
            Self::Promote => handle.promote_job(id).await,
        }
    }
}

pub(super) async fn batch(
    ctx: &mut ShellContext,
    op: MutateOp,
    ids: &[String],
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let resolution = resolve_many(&handle, ids).await?;
    for id in &resolution.not_found {
        display::warn_line(&format!("job \"{id}\" not found"));
    }
    if resolution.found.is_empty() {
        return Ok(CommandOutcome::Info("no matching jobs".to_string()));
    }
    if !confirmed(ctx, yes, op.question()).await? {
        return Ok(CommandOutcome::Cancelled);
    }
    let targets: Vec<JobId> = resolution.found.iter().map(|v| v.id.clone()).collect();
    apply_to_all(&handle, op, targets).await
}

pub(super) async fn retry_failed(
    ctx: &mut ShellContext,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let failed = handle.jobs_in_state(JobState::Failed, 0, -1).await?;
    if failed.is_empty() {
        return Ok(CommandOutcome::Info("no failed jobs".to_string()));
    }
    if !confirmed(
        ctx,
        yes,
        &format!("Retry {} failed job(s)? (y/n): ", failed.len()),
    )
    .await?
    {
        return Ok(CommandOutcome::Cancelled);
    }
    let targets: Vec<JobId> = failed.iter().map(|v| v.id.clone()).collect();
    apply_to_all(&handle, MutateOp::Retry, targets).await
}

/// Run one mutation across all targets concurrently. A failing id is
/// reported and skipped; the rest of the batch still goes through.
async fn apply_to_all(
    handle: &Arc<dyn QueueHandle>,
    op: MutateOp,
    targets: Vec<JobId>,
) -> Result<CommandOutcome, BullhornError> {
    let mutations = targets.iter().map(|id| {
        let handle = Arc::clone(handle);
        let id = id.clone();
        async move {
            let result = op.apply(&handle, &id).await;
            (id, result)
        }
    });
    let results = future::join_all(mutations).await;

    let mut done = Vec::new();
    for (id, result) in results {
        match result {
            Ok(()) => done.push(id),
            Err(e) => display::warn_line(&format!("job \"{id}\": {e}")),
        }
    }
    if done.is_empty() {
        return Ok(CommandOutcome::Info(format!(
            "no jobs {}",
            op.past_tense()
        )));
    }
    Ok(CommandOutcome::Done(format!(
        "Job(s) {} {}",
        display::quote_join(&done),
        op.past_tense()
    )))
}

pub(super) async fn fail(
    ctx: &mut ShellContext,
    id: &str,
    reason: &str,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let view = resolve_one(&handle, id).await?;
    if !confirmed(ctx, yes, "Fail? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    handle.fail_job(&view.id, reason).await?;
    Ok(CommandOutcome::Done(format!("Job \"{id}\" failed")))
}

pub(super) async fn complete(
    ctx: &mut ShellContext,
    id: &str,
    data: &str,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let return_value: Value = serde_json::from_str(data)
        .map_err(|_| BullhornError::Validation("\"data\" is not valid JSON".to_string()))?;
    let view = resolve_one(&handle, id).await?;
    if !confirmed(ctx, yes, "Complete? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    handle.complete_job(&view.id, return_value).await?;
    Ok(CommandOutcome::Done(format!("Job \"{id}\" completed")))
}

pub(super) async fn log(
    ctx: &mut ShellContext,
    id: &str,
    data: &str,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let view = resolve_one(&handle, id).await?;
    if !confirmed(ctx, yes, "Add log? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    handle.append_log(&view.id, data).await?;
    Ok(CommandOutcome::Done(format!("Log added to job \"{id}\"")))
}

pub(super) async fn logs(
    ctx: &mut ShellContext,
    id: &str,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let view = resolve_one(&handle, id).await?;
    let logs = handle
        .job_logs(&view.id, start.unwrap_or(0), end.unwrap_or(-1))
        .await?;
    display::print_logs(&logs);
    Ok(CommandOutcome::Info(String::new()))
}
