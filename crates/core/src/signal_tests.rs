// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn payload_wire_form_uses_the_id_key() {
    let payload = SignalPayload::new("001", SignalToken::from("tok-1"));
    let data = payload.to_data();
    assert_eq!(data.len(), 1);
    assert_eq!(data.get("Id").map(String::as_str), Some("001"));
}

#[test]
fn tokens_compare_by_value() {
    assert_eq!(SignalToken::from("a"), SignalToken::from("a"));
    assert_ne!(SignalToken::from("a"), SignalToken::from("b"));
}

#[test]
fn kinds_display_distinctly() {
    assert_eq!(SignalKind::Notification.to_string(), "notification");
    assert_eq!(
        SignalKind::SecondNotification.to_string(),
        "second-notification"
    );
}
