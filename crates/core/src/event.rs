// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events observed by the orchestrator

use crate::signal::{SignalKind, SignalToken};
use crate::stage::{StageHandle, StageName, StageState};
use serde::{Deserialize, Serialize};

/// Events that drive and describe a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A run began and its opening chain was submitted
    RunStarted {
        run_id: String,
        correlation_id: String,
    },

    /// A stage was accepted by the queue substrate
    StageSubmitted {
        stage: StageName,
        handle: StageHandle,
    },

    /// A stage reached a terminal lifecycle state
    StageFinished { stage: StageName, state: StageState },

    /// A signal source was launched
    SignalLaunched {
        source: SignalKind,
        channel_id: String,
        token: SignalToken,
    },

    /// A signal source published its completion event
    SignalCompleted {
        source: SignalKind,
        channel_id: String,
        token: SignalToken,
    },

    /// The run observed the final completion; no further submissions occur
    RunCompleted { run_id: String },
}

impl Event {
    /// Event name for pattern matching, "category:action"
    pub fn name(&self) -> String {
        match self {
            Event::RunStarted { .. } => "run:started".to_string(),
            Event::StageSubmitted { .. } => "stage:submitted".to_string(),
            Event::StageFinished { .. } => "stage:finished".to_string(),
            Event::SignalLaunched { .. } => "signal:launched".to_string(),
            Event::SignalCompleted { .. } => "signal:completed".to_string(),
            Event::RunCompleted { .. } => "run:completed".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
