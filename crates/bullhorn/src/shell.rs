// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive read-eval loop.
//!
//! One iteration reads a line, splits it with shell quoting rules, parses
//! it through the clap grammar, and dispatches. All failures are reported
//! at this single boundary; only `exit`, Ctrl-C, or end-of-input leave the
//! loop.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use bullhorn_broker::RedisConnector;
use bullhorn_core::{BullhornError, Confirm};

use crate::commands::{dispatch, CommandOutcome, ShellCommand, ShellContext, ShellLine};
use crate::config::BullhornConfig;
use crate::display;

/// Prompts on the controlling terminal. Only an exact `y` affirms;
/// anything else, including end-of-input, declines.
pub struct TtyConfirm;

#[async_trait]
impl Confirm for TtyConfirm {
    async fn confirm(&self, question: &str) -> Result<bool, BullhornError> {
        let question = question.to_string();
        tokio::task::spawn_blocking(move || {
            print!("{question}");
            std::io::stdout()
                .flush()
                .map_err(|e| BullhornError::Internal(format!("cannot flush stdout: {e}")))?;
            let mut answer = String::new();
            std::io::stdin()
                .read_line(&mut answer)
                .map_err(|e| BullhornError::Internal(format!("cannot read stdin: {e}")))?;
            Ok(answer.trim() == "y")
        })
        .await
        .map_err(|e| BullhornError::Internal(format!("confirmation task failed: {e}")))?
    }
}

/// Parse one prompt line into a command. The error string is already
/// rendered for the terminal (clap also routes `--help` output here).
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let words = shell_words::split(line).map_err(|e| format!("parse error: {e}"))?;
    ShellLine::try_parse_from(std::iter::once("bullhorn".to_string()).chain(words))
        .map(|parsed| parsed.command)
        .map_err(|e| e.to_string())
}

pub async fn run(config: BullhornConfig) -> Result<(), BullhornError> {
    let mut ctx = ShellContext::new(config, Arc::new(RedisConnector), Arc::new(TtyConfirm));
    let mut editor = DefaultEditor::new()
        .map_err(|e| BullhornError::Internal(format!("cannot initialize line editor: {e}")))?;

    let history_path = ctx.config.history_path();
    if history_path.exists() {
        if let Err(e) = editor.load_history(&history_path) {
            warn!(error = %e, "could not load shell history");
        }
    }

    println!("{}", "bullhorn".bold().green());
    println!("Type {} to leave.\n", "exit".yellow());

    loop {
        let prompt = match ctx.session.descriptor() {
            Some((prefix, queue)) => format!("BULL-REPL | {prefix}.{queue}> "),
            None => "BULL-REPL> ".to_string(),
        };
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);
                match parse_line(trimmed) {
                    Ok(command) => match dispatch(&mut ctx, command).await {
                        Ok(CommandOutcome::Done(message)) => println!("{}", message.green()),
                        Ok(CommandOutcome::Info(message)) => {
                            if !message.is_empty() {
                                println!("{message}");
                            }
                        }
                        Ok(CommandOutcome::Cancelled) => {
                            println!("{}", "cancelled".dimmed());
                        }
                        Ok(CommandOutcome::Exit) => break,
                        Err(error) => display::report_error(&error),
                    },
                    Err(message) => println!("{message}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("{}", format!("read error: {e}").red());
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(error = %e, "could not create data directory");
        }
    }
    if let Err(e) = editor.save_history(&history_path) {
        warn!(error = %e, "could not persist shell history");
    }

    ctx.session.shutdown().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}
