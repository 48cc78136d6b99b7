// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use relay_adapters::notify::fake::FakeNotifyAdapter;
use relay_adapters::queue::fake::FakeQueueAdapter;
use relay_adapters::signal::fake::FakeSignalAdapter;
use relay_core::clock::FakeClock;
use relay_core::id::SequentialIdGen;
use relay_core::signal::{SignalKind, SignalToken};
use relay_core::stage::StageName;

struct Setup {
    queue: FakeQueueAdapter,
    signals: FakeSignalAdapter,
    notify: FakeNotifyAdapter,
    runtime: Runtime<FakeQueueAdapter, FakeSignalAdapter, FakeNotifyAdapter, FakeClock>,
}

fn setup() -> Setup {
    let queue = FakeQueueAdapter::new();
    let signals = FakeSignalAdapter::new();
    let notify = FakeNotifyAdapter::new();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let run = Run::new("001", "001", "002", &SequentialIdGen::new("run"));
    let runtime = Runtime::new(
        RuntimeDeps {
            queue: queue.clone(),
            signals: signals.clone(),
            notify: notify.clone(),
        },
        run,
        EventBus::new(),
        FakeClock::new(),
        events_tx,
        events_rx,
        "relay",
    );
    Setup {
        queue,
        signals,
        notify,
        runtime,
    }
}

fn finished(stage: StageName) -> Event {
    Event::StageFinished {
        stage,
        state: StageState::Succeeded,
    }
}

fn completed(source: SignalKind, channel_id: &str, token: &SignalToken) -> Event {
    Event::SignalCompleted {
        source,
        channel_id: channel_id.to_string(),
        token: token.clone(),
    }
}

#[tokio::test]
async fn start_submits_the_opening_chain() {
    let s = setup();
    s.runtime.start().await.unwrap();

    assert_eq!(s.runtime.phase(), RunPhase::ChainRunning);
    let names: Vec<StageName> = s
        .queue
        .submitted_stages()
        .iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec![StageName::First, StageName::Second]);
}

#[tokio::test]
async fn second_stage_finish_launches_first_signal() {
    let s = setup();
    s.runtime.start().await.unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();

    assert_eq!(s.runtime.phase(), RunPhase::AwaitingFirstSignal);
    let launches = s.signals.launches_of(SignalKind::Notification);
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].channel_id, "001");
    assert!(s
        .notify
        .messages()
        .contains(&"Second process is done".to_string()));
}

#[tokio::test]
async fn duplicate_terminal_events_launch_at_most_once() {
    let s = setup();
    s.runtime.start().await.unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();

    assert_eq!(s.signals.launches_of(SignalKind::Notification).len(), 1);
}

#[tokio::test]
async fn first_signal_completion_submits_third_stage() {
    let s = setup();
    s.runtime.start().await.unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();

    let token = s.runtime.snapshot().first_token().clone();
    s.runtime
        .handle_event(completed(SignalKind::Notification, "001", &token))
        .await
        .unwrap();

    assert_eq!(s.runtime.phase(), RunPhase::ThirdRunning);
    let names: Vec<StageName> = s
        .queue
        .submitted_stages()
        .iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(
        names,
        vec![StageName::First, StageName::Second, StageName::Third]
    );
    assert!(s
        .notify
        .messages()
        .contains(&"Process for notification channel ID 001 is done!".to_string()));
}

#[tokio::test]
async fn stale_token_does_not_advance_the_run() {
    let s = setup();
    s.runtime.start().await.unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();

    s.runtime
        .handle_event(completed(
            SignalKind::Notification,
            "001",
            &SignalToken::from("some-other-run"),
        ))
        .await
        .unwrap();

    assert_eq!(s.runtime.phase(), RunPhase::AwaitingFirstSignal);
}

#[tokio::test]
async fn failed_stage_advances_like_success() {
    let s = setup();
    s.runtime.start().await.unwrap();
    s.runtime
        .handle_event(Event::StageFinished {
            stage: StageName::Second,
            state: StageState::Failed {
                reason: "exit 1".to_string(),
            },
        })
        .await
        .unwrap();

    assert_eq!(s.runtime.phase(), RunPhase::AwaitingFirstSignal);
    assert_eq!(s.signals.launches_of(SignalKind::Notification).len(), 1);
}

#[tokio::test]
async fn full_sequence_reaches_done() {
    let s = setup();
    let mut tap = s.runtime.bus().tap();
    s.runtime.start().await.unwrap();

    s.runtime
        .handle_event(finished(StageName::First))
        .await
        .unwrap();
    s.runtime
        .handle_event(finished(StageName::Second))
        .await
        .unwrap();
    let first_token = s.runtime.snapshot().first_token().clone();
    s.runtime
        .handle_event(completed(SignalKind::Notification, "001", &first_token))
        .await
        .unwrap();
    s.runtime
        .handle_event(finished(StageName::Third))
        .await
        .unwrap();
    let second_token = s.runtime.snapshot().second_token().clone();
    s.runtime
        .handle_event(completed(
            SignalKind::SecondNotification,
            "002",
            &second_token,
        ))
        .await
        .unwrap();

    assert!(s.runtime.is_done());
    assert_eq!(
        s.notify.messages(),
        vec![
            "First process is done",
            "Second process is done",
            "Process for notification channel ID 001 is done!",
            "Third process is done",
            "Second notification service finished for ID 002",
        ]
    );

    // The bus saw the run's lifecycle events
    let mut saw_completed = false;
    while let Ok(event) = tap.try_recv() {
        if matches!(event, Event::RunCompleted { .. }) {
            saw_completed = true;
        }
    }
    assert!(saw_completed);
}

#[tokio::test]
async fn run_to_completion_drives_from_channel_events() {
    let queue = FakeQueueAdapter::new();
    let signals = FakeSignalAdapter::new();
    let notify = FakeNotifyAdapter::new();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let run = Run::new("001", "001", "002", &SequentialIdGen::new("run"));
    let first_token = run.first_token().clone();
    let second_token = run.second_token().clone();

    let mut runtime = Runtime::new(
        RuntimeDeps {
            queue,
            signals,
            notify: notify.clone(),
        },
        run,
        EventBus::new(),
        FakeClock::new(),
        events_tx.clone(),
        events_rx,
        "relay",
    );

    // Feed the whole event sequence up front; the loop consumes it in order
    events_tx.send(finished(StageName::First)).unwrap();
    events_tx.send(finished(StageName::Second)).unwrap();
    events_tx
        .send(completed(SignalKind::Notification, "001", &first_token))
        .unwrap();
    events_tx.send(finished(StageName::Third)).unwrap();
    events_tx
        .send(completed(
            SignalKind::SecondNotification,
            "002",
            &second_token,
        ))
        .unwrap();

    runtime.run_to_completion().await.unwrap();
    assert!(runtime.is_done());
    assert_eq!(notify.messages().len(), 5);
}
