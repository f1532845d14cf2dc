// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection management commands.

use clap::Parser;
use colored::Colorize;

use bullhorn_core::{BullhornError, ConnectionProfile, Endpoint};

use crate::commands::{dispatch, CommandOutcome, ConnectArgs, ShellContext, ShellLine};
use crate::config::BullhornConfig;

pub(super) async fn connect(
    ctx: &mut ShellContext,
    args: ConnectArgs,
) -> Result<CommandOutcome, BullhornError> {
    let profile = profile_from_args(&ctx.config, &args)?;
    let message = open_session(ctx, &profile).await?;
    match args.exec {
        Some(line) => {
            // The connect feedback prints here so the exec command's own
            // outcome can flow through the normal reporting path.
            println!("{}", message.green());
            let words = shell_words::split(&line)
                .map_err(|e| BullhornError::Validation(format!("invalid exec command: {e}")))?;
            let parsed =
                ShellLine::try_parse_from(std::iter::once("bullhorn".to_string()).chain(words))
                    .map_err(|e| BullhornError::Validation(e.to_string()))?;
            Box::pin(dispatch(ctx, parsed.command)).await
        }
        None => Ok(CommandOutcome::Done(message)),
    }
}

pub(super) fn connect_list(ctx: &ShellContext) -> Result<CommandOutcome, BullhornError> {
    let names = ctx.registry.list()?;
    for name in &names {
        println!("{name}");
    }
    Ok(CommandOutcome::Info(format!(
        "{} saved connection(s)",
        names.len()
    )))
}

pub(super) fn connect_save(ctx: &ShellContext, name: &str) -> Result<CommandOutcome, BullhornError> {
    let profile = ctx
        .session
        .profile()
        .cloned()
        .ok_or(BullhornError::NoSession)?;
    ctx.registry.save(name, &profile)?;
    Ok(CommandOutcome::Done(format!(
        "Connection saved as \"{name}\""
    )))
}

pub(super) fn connect_rm(ctx: &ShellContext, name: &str) -> Result<CommandOutcome, BullhornError> {
    if ctx.registry.remove(name)? {
        Ok(CommandOutcome::Done(format!(
            "Connection \"{name}\" removed"
        )))
    } else {
        Ok(CommandOutcome::Info(format!(
            "Connection \"{name}\" not found"
        )))
    }
}

pub(super) async fn connect_to(
    ctx: &mut ShellContext,
    name: &str,
) -> Result<CommandOutcome, BullhornError> {
    let profile = ctx.registry.get(name)?;
    let message = open_session(ctx, &profile).await?;
    Ok(CommandOutcome::Done(message))
}

/// Replace the session with a freshly opened handle and remember the
/// profile as last used. The session retires the old handle before the
/// connector dials the new one.
async fn open_session(
    ctx: &mut ShellContext,
    profile: &ConnectionProfile,
) -> Result<String, BullhornError> {
    ctx.session
        .install(ctx.connector.open(profile), profile.clone())
        .await?;
    ctx.registry.save_last(profile)?;
    Ok(format!(
        "Connected to {}, prefix: {}, queue: {}",
        profile.address(),
        profile.prefix,
        profile.queue
    ))
}

fn profile_from_args(
    config: &BullhornConfig,
    args: &ConnectArgs,
) -> Result<ConnectionProfile, BullhornError> {
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config.connection.prefix.clone());
    let endpoint = match &args.uri {
        Some(uri) => Endpoint::Uri { uri: uri.clone() },
        None => Endpoint::Host {
            host: args
                .host
                .clone()
                .unwrap_or_else(|| config.connection.host.clone()),
            port: args.port.unwrap_or(config.connection.port),
            db: args.db.unwrap_or(0),
            username: args.username.clone(),
            password: args.password.clone(),
            cert: args.cert.clone(),
            accept_unauthorized: args.accept_unauthorized,
        },
    };
    Ok(ConnectionProfile {
        queue: args.queue.clone(),
        prefix,
        endpoint,
    })
}
