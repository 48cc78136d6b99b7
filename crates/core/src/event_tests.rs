// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn event_names_are_namespaced() {
    let event = Event::StageFinished {
        stage: StageName::First,
        state: StageState::Succeeded,
    };
    assert_eq!(event.name(), "stage:finished");

    let event = Event::SignalCompleted {
        source: SignalKind::Notification,
        channel_id: "001".to_string(),
        token: SignalToken::from("t"),
    };
    assert_eq!(event.name(), "signal:completed");
}

#[test]
fn events_round_trip_through_json() {
    let event = Event::RunStarted {
        run_id: "run-1".to_string(),
        correlation_id: "001".to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
