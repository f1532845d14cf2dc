// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shell command grammar. Each line read from the prompt is split with
//! shell quoting rules and parsed through this tree, so `--help` works at
//! the prompt for every command.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bullhorn",
    disable_version_flag = true,
    about = "Bull queue admin shell"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Connect to a queue
    Connect(ConnectArgs),
    /// List saved connections
    ConnectList,
    /// Save the current connection under a name
    ConnectSave {
        name: String,
    },
    /// Remove a saved connection
    ConnectRm {
        name: String,
    },
    /// Connect using a saved connection
    ConnectTo {
        name: String,
    },
    /// Job counts per state
    Stats,
    /// Fetch active jobs
    Active(ListArgs),
    /// Fetch waiting jobs
    Waiting(ListArgs),
    /// Fetch completed jobs
    Completed(ListArgs),
    /// Fetch failed jobs
    Failed(ListArgs),
    /// Fetch delayed jobs
    Delayed(ListArgs),
    /// Fetch jobs by id
    Get {
        #[arg(required = true, value_name = "JOB_ID")]
        job_ids: Vec<String>,
    },
    /// Add a job to the queue
    Add(AddArgs),
    /// Remove jobs by id
    Rm {
        #[arg(required = true, value_name = "JOB_ID")]
        job_ids: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Re-enqueue failed jobs by id
    Retry {
        #[arg(required = true, value_name = "JOB_ID")]
        job_ids: Vec<String>,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Re-enqueue every failed job
    RetryFailed {
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Move delayed jobs to the wait list
    Promote {
        #[arg(required = true, value_name = "JOB_ID")]
        job_ids: Vec<String>,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Mark a job as failed
    Fail {
        job_id: String,
        /// Failure reason to record
        reason: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Mark a job as completed
    Complete {
        job_id: String,
        /// Return value as JSON
        data: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Remove old jobs in one state
    Clean(CleanArgs),
    /// Show a job's log rows
    Logs {
        job_id: String,
        #[arg(long)]
        start: Option<i64>,
        #[arg(long)]
        end: Option<i64>,
    },
    /// Append a log row to a job
    Log {
        job_id: String,
        data: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Pause the queue
    Pause {
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Resume a paused queue
    Resume {
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Stream queue events to the terminal
    EventsOn,
    /// Stop streaming queue events
    EventsOff,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Args, Debug, Default)]
pub struct ConnectArgs {
    /// Queue name
    pub queue: String,
    /// Key prefix shared with the queue's workers
    #[arg(long)]
    pub prefix: Option<String>,
    /// Full connection URI (redis:// or rediss://)
    #[arg(
        long,
        conflicts_with_all = ["host", "port", "db", "username", "password", "cert", "accept_unauthorized"]
    )]
    pub uri: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Database number
    #[arg(long)]
    pub db: Option<i64>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// Path to a CA certificate; enables TLS
    #[arg(long)]
    pub cert: Option<String>,
    /// Enable TLS without certificate verification
    #[arg(long)]
    pub accept_unauthorized: bool,
    /// Run one command right after connecting
    #[arg(long, value_name = "COMMAND")]
    pub exec: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Structured JSON query over the displayed job fields
    #[arg(long)]
    pub query: Option<String>,
    /// Only jobs enqueued within this window, e.g. "2h" or "30m"
    #[arg(long)]
    pub time_ago: Option<String>,
    /// First index of the page, inclusive
    #[arg(long, default_value_t = 0)]
    pub start: i64,
    /// Last index of the page, inclusive; defaults to the configured page size
    #[arg(long)]
    pub end: Option<i64>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Job payload as JSON
    pub data: String,
    /// Name for a named job
    #[arg(long)]
    pub name: Option<String>,
    /// Explicit job id
    #[arg(long)]
    pub job_id: Option<String>,
    /// Smaller runs earlier
    #[arg(long)]
    pub priority: Option<i64>,
    /// Delay before the job becomes available, in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,
    /// Total attempts before the job is declared failed
    #[arg(long)]
    pub attempts: Option<u32>,
    /// Re-enqueue every this many milliseconds
    #[arg(long)]
    pub repeat: Option<u64>,
    /// Enqueue at the tail instead of the head
    #[arg(long)]
    pub lifo: bool,
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Age threshold, e.g. "1d" or "7200000"
    pub period: String,
    /// State to clean (defaults to completed)
    #[arg(long)]
    pub status: Option<String>,
    /// Clean at most this many jobs
    #[arg(long)]
    pub limit: Option<i64>,
    #[arg(short = 'y', long)]
    pub yes: bool,
}
