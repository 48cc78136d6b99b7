// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal sources
//!
//! A signal source is a long-running foreground service that publishes a
//! one-shot completion event, distinct from the task-queue lifecycle
//! mechanism. Each launch carries a run-scoped token that is echoed back in
//! the completion event, so subscribers can tell this run's completion apart
//! from a stale one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire key under which the channel id travels in a launch payload
pub const PAYLOAD_ID_KEY: &str = "Id";

/// The two foreground signal sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// First notification service, launched after the second stage finishes
    Notification,
    /// Second notification service, launched after the third stage finishes
    SecondNotification,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalKind::Notification => "notification",
            SignalKind::SecondNotification => "second-notification",
        };
        write!(f, "{}", name)
    }
}

/// Run-scoped token identifying one launch of a signal source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalToken(pub String);

impl std::fmt::Display for SignalToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SignalToken {
    fn from(s: &str) -> Self {
        SignalToken(s.to_string())
    }
}

/// Launch payload for a signal source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPayload {
    /// Channel identifier the service presents while it runs
    pub channel_id: String,
    /// Token echoed back in the completion event
    pub token: SignalToken,
}

impl SignalPayload {
    pub fn new(channel_id: impl Into<String>, token: SignalToken) -> Self {
        Self {
            channel_id: channel_id.into(),
            token,
        }
    }

    /// Wire form: a single-entry map keyed by [`PAYLOAD_ID_KEY`]
    pub fn to_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert(PAYLOAD_ID_KEY.to_string(), self.channel_id.clone());
        data
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
