// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue-level commands: stats, listings, clean, pause/resume, events.

use bullhorn_core::{duration_ms, parse_duration, BullhornError, JobState};

use crate::commands::{confirmed, CleanArgs, CommandOutcome, ListArgs, ShellContext};
use crate::display;
use crate::listing::{self, ListRequest};

pub(super) async fn stats(ctx: &mut ShellContext) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let counts = handle.job_counts().await?;
    display::print_counts(&counts);
    Ok(CommandOutcome::Info(String::new()))
}

pub(super) async fn list_state(
    ctx: &mut ShellContext,
    state: JobState,
    args: ListArgs,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let request = ListRequest {
        state,
        start: args.start,
        end: args.end.unwrap_or(ctx.config.shell.page_size),
        time_ago: args.time_ago,
        query: args.query,
    };
    let views = listing::list(&handle, &request).await?;
    display::print_jobs(&views);
    Ok(CommandOutcome::Info(format!(
        "{} {} job(s)",
        views.len(),
        state
    )))
}

pub(super) async fn clean(
    ctx: &mut ShellContext,
    args: CleanArgs,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    let grace = parse_duration(&args.period)?;
    let status: JobState = args
        .status
        .as_deref()
        .unwrap_or("completed")
        .parse()
        .map_err(BullhornError::Validation)?;
    // A missing or non-positive limit means clean everything that matches.
    let limit = args.limit.filter(|n| *n > 0).map(|n| n as u64);
    if !confirmed(ctx, args.yes, "Clean? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    let cleaned = handle.clean(duration_ms(grace), status, limit).await?;
    if cleaned.is_empty() {
        return Ok(CommandOutcome::Info("no jobs cleaned".to_string()));
    }
    Ok(CommandOutcome::Done(format!(
        "Job(s) {} cleaned",
        display::quote_join(&cleaned)
    )))
}

pub(super) async fn pause(
    ctx: &mut ShellContext,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    if !confirmed(ctx, yes, "Pause queue? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    handle.pause().await?;
    Ok(CommandOutcome::Done("Queue paused".to_string()))
}

pub(super) async fn resume(
    ctx: &mut ShellContext,
    yes: bool,
) -> Result<CommandOutcome, BullhornError> {
    let handle = ctx.session.current().await?;
    if !confirmed(ctx, yes, "Resume queue? (y/n): ").await? {
        return Ok(CommandOutcome::Cancelled);
    }
    handle.resume().await?;
    Ok(CommandOutcome::Done("Queue resumed".to_string()))
}

pub(super) async fn events_on(ctx: &mut ShellContext) -> Result<CommandOutcome, BullhornError> {
    if ctx.session.enable_events().await? {
        Ok(CommandOutcome::Done("Events on".to_string()))
    } else {
        Ok(CommandOutcome::Info("events already on".to_string()))
    }
}

pub(super) fn events_off(ctx: &mut ShellContext) -> Result<CommandOutcome, BullhornError> {
    if ctx.session.disable_events() {
        Ok(CommandOutcome::Done("Events off".to_string()))
    } else {
        Ok(CommandOutcome::Info("events already off".to_string()))
    }
}
