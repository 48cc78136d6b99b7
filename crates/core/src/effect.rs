// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects requested by the run state machine
//!
//! The state machine never performs I/O; it returns effects for the engine's
//! executor to carry out against the adapters.

use crate::event::Event;
use crate::signal::{SignalKind, SignalPayload};
use crate::stage::StageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish an event for other components to observe
    Emit(Event),
    /// Show a transient user-visible notice
    Notice { message: String },
    /// Submit stages as one chained group; they execute strictly in the
    /// given order, each gated on its predecessor's terminal state
    SubmitChain { stages: Vec<StageDescriptor> },
    /// Submit a single independent stage
    SubmitStage { stage: StageDescriptor },
    /// Launch a foreground signal source
    LaunchSignal {
        source: SignalKind,
        payload: SignalPayload,
    },
}

impl Effect {
    /// Short name for tracing spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Emit(_) => "emit",
            Effect::Notice { .. } => "notice",
            Effect::SubmitChain { .. } => "submit_chain",
            Effect::SubmitStage { .. } => "submit_stage",
            Effect::LaunchSignal { .. } => "launch_signal",
        }
    }
}
