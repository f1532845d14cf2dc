// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end command dispatch over an in-memory queue.

use std::sync::Arc;

use serde_json::json;

use bullhorn::commands::{
    dispatch, AddArgs, CleanArgs, CommandOutcome, ConnectArgs, ShellCommand, ShellContext,
};
use bullhorn::config::BullhornConfig;
use bullhorn_core::{BullhornError, JobState, JobView};
use bullhorn_test_utils::{MemoryConnector, MemoryQueue, ScriptedConfirm};

struct Harness {
    _dir: tempfile::TempDir,
    ctx: ShellContext,
    connector: Arc<MemoryConnector>,
    confirm: Arc<ScriptedConfirm>,
}

fn harness(answers: &[bool]) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = BullhornConfig::default();
    config.shell.data_dir = Some(dir.path().to_path_buf());
    let connector = Arc::new(MemoryConnector::new());
    let confirm = Arc::new(ScriptedConfirm::new(answers));
    let ctx = ShellContext::new(config, connector.clone(), confirm.clone());
    Harness {
        _dir: dir,
        ctx,
        connector,
        confirm,
    }
}

async fn connect(h: &mut Harness, queue: &str) -> Arc<MemoryQueue> {
    let args = ConnectArgs {
        queue: queue.to_string(),
        ..ConnectArgs::default()
    };
    let outcome = dispatch(&mut h.ctx, ShellCommand::Connect(args))
        .await
        .unwrap();
    assert!(matches!(outcome, CommandOutcome::Done(_)));
    h.connector.last_handle().await.unwrap()
}

fn add_args(data: &str, yes: bool) -> AddArgs {
    AddArgs {
        data: data.to_string(),
        name: None,
        job_id: None,
        priority: None,
        delay: None,
        attempts: None,
        repeat: None,
        lifo: false,
        yes,
    }
}

fn view(id: &str, time: i64) -> JobView {
    JobView::new(id, "__default__", json!({"id": id}), time)
}

#[tokio::test]
async fn commands_require_a_session() {
    let mut h = harness(&[]);
    let result = dispatch(&mut h.ctx, ShellCommand::Stats).await;
    assert!(matches!(result, Err(BullhornError::NoSession)));
}

#[tokio::test]
async fn connect_records_the_last_used_profile() {
    let mut h = harness(&[]);
    connect(&mut h, "emails").await;
    let last = h.ctx.registry.get("__last-used__").unwrap();
    assert_eq!(last.queue, "emails");
    assert_eq!(h.connector.open_count().await, 1);
}

#[tokio::test]
async fn reconnect_closes_the_previous_handle() {
    let mut h = harness(&[]);
    let first = connect(&mut h, "emails").await;
    let second = connect(&mut h, "invoices").await;
    assert_eq!(first.close_calls(), 1);
    assert_eq!(second.close_calls(), 0);
}

#[tokio::test]
async fn connect_exec_runs_one_follow_up_command() {
    let mut h = harness(&[]);
    let args = ConnectArgs {
        queue: "emails".to_string(),
        exec: Some("stats".to_string()),
        ..ConnectArgs::default()
    };
    let outcome = dispatch(&mut h.ctx, ShellCommand::Connect(args))
        .await
        .unwrap();
    // The exec outcome replaces the plain connect feedback.
    assert!(matches!(outcome, CommandOutcome::Info(_)));
    let queue = h.connector.last_handle().await.unwrap();
    assert_eq!(queue.call_count("job_counts").await, 1);
}

#[tokio::test]
async fn saved_connections_round_trip_through_commands() {
    let mut h = harness(&[]);
    connect(&mut h, "emails").await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::ConnectSave {
            name: "prod".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::Done(_)));
    assert_eq!(
        h.ctx.registry.list().unwrap(),
        vec!["__last-used__".to_string(), "prod".to_string()]
    );

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::ConnectTo {
            name: "prod".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::Done(_)));
    assert_eq!(h.connector.open_count().await, 2);

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::ConnectRm {
            name: "prod".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::Done(_)));
    assert_eq!(
        h.ctx.registry.list().unwrap(),
        vec!["__last-used__".to_string()]
    );
}

#[tokio::test]
async fn the_reserved_registry_name_is_refused() {
    let mut h = harness(&[]);
    connect(&mut h, "emails").await;
    let result = dispatch(
        &mut h.ctx,
        ShellCommand::ConnectSave {
            name: "__last-used__".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(BullhornError::ReservedName(_))));
}

#[tokio::test]
async fn get_partitions_hits_from_misses() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Waiting, view("1", 1_000)).await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Get {
            job_ids: vec!["1".to_string(), "9".to_string()],
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommandOutcome::Info("1 of 2 job(s) found".into()));
}

#[tokio::test]
async fn declined_add_never_reaches_the_backend() {
    let mut h = harness(&[false]);
    let queue = connect(&mut h, "emails").await;

    let outcome = dispatch(&mut h.ctx, ShellCommand::Add(add_args("{\"n\": 1}", false)))
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Cancelled);
    assert_eq!(queue.call_count("add_job").await, 0);
    assert_eq!(h.confirm.questions().await, vec!["Add? (y/n): ".to_string()]);
}

#[tokio::test]
async fn invalid_payload_fails_before_the_prompt() {
    let mut h = harness(&[true]);
    let queue = connect(&mut h, "emails").await;

    let result = dispatch(&mut h.ctx, ShellCommand::Add(add_args("{broken", false))).await;
    assert!(matches!(result, Err(BullhornError::Validation(_))));
    assert_eq!(queue.call_count("add_job").await, 0);
    assert!(h.confirm.questions().await.is_empty());
}

#[tokio::test]
async fn add_forwards_enqueue_options() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;

    let mut args = add_args("{\"n\": 1}", true);
    args.name = Some("welcome".to_string());
    args.delay = Some(5_000);
    args.priority = Some(2);
    let outcome = dispatch(&mut h.ctx, ShellCommand::Add(args)).await.unwrap();
    match outcome {
        CommandOutcome::Done(message) => assert!(message.contains("welcome")),
        other => panic!("unexpected: {other:?}"),
    }
    let opts = queue.last_add_opts().await.unwrap();
    assert_eq!(opts.delay_ms, Some(5_000));
    assert_eq!(opts.priority, Some(2));
}

#[tokio::test]
async fn batch_removal_warns_on_misses_and_removes_the_rest() {
    let mut h = harness(&[true]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Waiting, view("1", 1_000)).await;
    queue.seed(JobState::Waiting, view("2", 2_000)).await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Rm {
            job_ids: vec!["1".to_string(), "9".to_string(), "2".to_string()],
            yes: false,
        },
    )
    .await
    .unwrap();
    match outcome {
        CommandOutcome::Done(message) => {
            assert!(message.contains("\"1\""));
            assert!(message.contains("\"2\""));
            assert!(message.contains("removed"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(queue.job_state("1").await, None);
    assert_eq!(queue.job_state("2").await, None);
    assert_eq!(
        h.confirm.questions().await,
        vec!["Remove? (y/n): ".to_string()]
    );
}

#[tokio::test]
async fn batch_continues_past_per_job_failures() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Failed, view("1", 1_000)).await;
    queue.seed(JobState::Failed, view("2", 2_000)).await;
    queue.fail_mutations_for("1").await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Retry {
            job_ids: vec!["1".to_string(), "2".to_string()],
            yes: true,
        },
    )
    .await
    .unwrap();
    match outcome {
        CommandOutcome::Done(message) => {
            assert!(message.contains("\"2\""));
            assert!(!message.contains("\"1\""));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(queue.call_count("retry_job").await, 2);
    assert_eq!(queue.job_state("2").await, Some(JobState::Waiting));
}

#[tokio::test]
async fn batch_with_only_misses_skips_the_prompt() {
    let mut h = harness(&[true]);
    let queue = connect(&mut h, "emails").await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Rm {
            job_ids: vec!["9".to_string()],
            yes: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommandOutcome::Info("no matching jobs".into()));
    assert!(h.confirm.questions().await.is_empty());
    assert_eq!(queue.call_count("remove_job").await, 0);
}

#[tokio::test]
async fn retry_failed_targets_every_failed_job() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Failed, view("1", 1_000)).await;
    queue.seed(JobState::Failed, view("2", 2_000)).await;

    let outcome = dispatch(&mut h.ctx, ShellCommand::RetryFailed { yes: true })
        .await
        .unwrap();
    assert!(matches!(outcome, CommandOutcome::Done(_)));
    assert_eq!(queue.job_state("1").await, Some(JobState::Waiting));
    assert_eq!(queue.job_state("2").await, Some(JobState::Waiting));
}

#[tokio::test]
async fn retry_failed_with_nothing_to_do_skips_the_prompt() {
    let mut h = harness(&[true]);
    connect(&mut h, "emails").await;
    let outcome = dispatch(&mut h.ctx, ShellCommand::RetryFailed { yes: false })
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Info("no failed jobs".into()));
    assert!(h.confirm.questions().await.is_empty());
}

#[tokio::test]
async fn fail_and_complete_move_a_job_between_states() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Active, view("1", 1_000)).await;

    dispatch(
        &mut h.ctx,
        ShellCommand::Fail {
            job_id: "1".to_string(),
            reason: "manual".to_string(),
            yes: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(queue.job_state("1").await, Some(JobState::Failed));

    dispatch(
        &mut h.ctx,
        ShellCommand::Complete {
            job_id: "1".to_string(),
            data: "{\"ok\": true}".to_string(),
            yes: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(queue.job_state("1").await, Some(JobState::Completed));
}

#[tokio::test]
async fn mutating_a_missing_job_is_job_not_found() {
    let mut h = harness(&[]);
    connect(&mut h, "emails").await;
    let result = dispatch(
        &mut h.ctx,
        ShellCommand::Fail {
            job_id: "9".to_string(),
            reason: "manual".to_string(),
            yes: true,
        },
    )
    .await;
    match result {
        Err(BullhornError::JobNotFound(id)) => assert_eq!(id, "9"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn log_appends_and_logs_reads_back() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Active, view("1", 1_000)).await;

    dispatch(
        &mut h.ctx,
        ShellCommand::Log {
            job_id: "1".to_string(),
            data: "first attempt".to_string(),
            yes: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(
        queue.job_log_rows("1").await,
        vec!["first attempt".to_string()]
    );

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Logs {
            job_id: "1".to_string(),
            start: None,
            end: None,
        },
    )
    .await
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::Info(_)));
}

#[tokio::test]
async fn clean_with_a_bogus_status_never_reaches_the_backend() {
    let mut h = harness(&[true]);
    let queue = connect(&mut h, "emails").await;

    let result = dispatch(
        &mut h.ctx,
        ShellCommand::Clean(CleanArgs {
            period: "1h".to_string(),
            status: Some("bogus".to_string()),
            limit: None,
            yes: false,
        }),
    )
    .await;
    assert!(matches!(result, Err(BullhornError::Validation(_))));
    assert_eq!(queue.call_count("clean").await, 0);
    assert!(h.confirm.questions().await.is_empty());
}

#[tokio::test]
async fn clean_defaults_to_completed_and_reports_cleaned_ids() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Completed, view("1", 1_000)).await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Clean(CleanArgs {
            period: "0".to_string(),
            status: None,
            limit: Some(-5),
            yes: true,
        }),
    )
    .await
    .unwrap();
    match outcome {
        CommandOutcome::Done(message) => assert!(message.contains("cleaned")),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(queue.job_state("1").await, None);
}

#[tokio::test]
async fn declined_pause_leaves_the_queue_running() {
    let mut h = harness(&[false]);
    let queue = connect(&mut h, "emails").await;

    let outcome = dispatch(&mut h.ctx, ShellCommand::Pause { yes: false })
        .await
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Cancelled);
    assert_eq!(queue.call_count("pause").await, 0);
}

#[tokio::test]
async fn event_streaming_toggles_one_subscription() {
    let mut h = harness(&[]);
    let queue = connect(&mut h, "emails").await;

    let outcome = dispatch(&mut h.ctx, ShellCommand::EventsOn).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Done("Events on".into()));
    let outcome = dispatch(&mut h.ctx, ShellCommand::EventsOn).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Info("events already on".into()));
    assert_eq!(queue.active_subscriptions().await, 1);

    let outcome = dispatch(&mut h.ctx, ShellCommand::EventsOff).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Done("Events off".into()));
    tokio::task::yield_now().await;
    assert_eq!(queue.active_subscriptions().await, 0);
}

#[tokio::test]
async fn listing_applies_the_default_page_size() {
    let mut h = harness(&[]);
    h.ctx.config.shell.page_size = 1;
    let queue = connect(&mut h, "emails").await;
    queue.seed(JobState::Waiting, view("1", 1_000)).await;
    queue.seed(JobState::Waiting, view("2", 2_000)).await;
    queue.seed(JobState::Waiting, view("3", 3_000)).await;

    let outcome = dispatch(
        &mut h.ctx,
        ShellCommand::Waiting(bullhorn::commands::ListArgs::default()),
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommandOutcome::Info("2 waiting job(s)".into()));
}
