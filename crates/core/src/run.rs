// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run state machine
//!
//! Drives the five-stage sequence strictly in order: first and second stage
//! as one chained submission, then the first signal source, then the third
//! stage, then the second signal source. Every transition is a reaction to
//! one observed event; duplicate terminal notifications, stale completion
//! tokens, and events arriving in the wrong phase are identity transitions,
//! so no downstream action can fire twice.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::event::Event;
use crate::id::IdGen;
use crate::signal::{SignalKind, SignalPayload, SignalToken};
use crate::stage::{Constraint, StageDescriptor, StageName, StageState};
use std::time::Instant;

/// Unique identifier for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(pub String);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the run is in the five-stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Created, nothing submitted yet
    Created,
    /// First and second stage submitted as a chain
    ChainRunning,
    /// First signal source launched, waiting for its completion event
    AwaitingFirstSignal,
    /// Third stage submitted
    ThirdRunning,
    /// Second signal source launched, waiting for its completion event
    AwaitingSecondSignal,
    /// Final completion observed; the run produces no further effects
    Done,
}

/// Events the run reacts to
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Begin the run: submit the first and second stage as a chain
    Start,
    /// A stage reached a terminal lifecycle state
    StageFinished { stage: StageName, state: StageState },
    /// A signal source published completion
    SignalCompleted {
        source: SignalKind,
        channel_id: String,
        token: SignalToken,
    },
}

/// One pipeline run
///
/// The correlation id is created once and re-supplied verbatim to every
/// stage. Signal channel ids are separate from the correlation id on
/// purpose: the two services present distinct notification channels.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: RunId,
    pub correlation_id: String,
    pub phase: RunPhase,
    /// Channel id for the first signal source
    pub first_channel: String,
    /// Channel id for the second signal source
    pub second_channel: String,
    pub started_at: Option<Instant>,
    pub completed_at: Option<Instant>,
    first_token: SignalToken,
    second_token: SignalToken,
    /// The first stage's finish gates nothing downstream; only its notice
    /// needs deduplication
    first_noticed: bool,
}

impl Run {
    /// Create a run with pre-generated launch tokens
    pub fn new(
        correlation_id: impl Into<String>,
        first_channel: impl Into<String>,
        second_channel: impl Into<String>,
        id_gen: &impl IdGen,
    ) -> Self {
        Self {
            id: RunId(id_gen.next()),
            correlation_id: correlation_id.into(),
            phase: RunPhase::Created,
            first_channel: first_channel.into(),
            second_channel: second_channel.into(),
            started_at: None,
            completed_at: None,
            first_token: SignalToken(id_gen.next()),
            second_token: SignalToken(id_gen.next()),
            first_noticed: false,
        }
    }

    fn stage(&self, name: StageName) -> StageDescriptor {
        StageDescriptor::new(name, self.correlation_id.clone())
            .with_constraint(Constraint::NetworkConnected)
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: RunEvent, clock: &impl Clock) -> (Run, Vec<Effect>) {
        match (self.phase, event) {
            (RunPhase::Created, RunEvent::Start) => {
                let run = Run {
                    phase: RunPhase::ChainRunning,
                    started_at: Some(clock.now()),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::SubmitChain {
                        stages: vec![self.stage(StageName::First), self.stage(StageName::Second)],
                    },
                    Effect::Emit(Event::RunStarted {
                        run_id: self.id.0.clone(),
                        correlation_id: self.correlation_id.clone(),
                    }),
                ];
                (run, effects)
            }

            // The first stage's finish is observed but does not gate anything
            // downstream; the second stage proceeds on the chain's ordering.
            (
                _,
                RunEvent::StageFinished {
                    stage: StageName::First,
                    ..
                },
            ) if !self.first_noticed => {
                let run = Run {
                    first_noticed: true,
                    ..self.clone()
                };
                let effects = vec![Effect::Notice {
                    message: "First process is done".to_string(),
                }];
                (run, effects)
            }

            (
                RunPhase::ChainRunning,
                RunEvent::StageFinished {
                    stage: StageName::Second,
                    ..
                },
            ) => {
                let run = Run {
                    phase: RunPhase::AwaitingFirstSignal,
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Notice {
                        message: "Second process is done".to_string(),
                    },
                    Effect::LaunchSignal {
                        source: SignalKind::Notification,
                        payload: SignalPayload::new(
                            self.first_channel.clone(),
                            self.first_token.clone(),
                        ),
                    },
                ];
                (run, effects)
            }

            (
                RunPhase::AwaitingFirstSignal,
                RunEvent::SignalCompleted {
                    source: SignalKind::Notification,
                    channel_id,
                    token,
                },
            ) if token == self.first_token => {
                let run = Run {
                    phase: RunPhase::ThirdRunning,
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Notice {
                        message: format!(
                            "Process for notification channel ID {} is done!",
                            channel_id
                        ),
                    },
                    Effect::SubmitStage {
                        stage: self.stage(StageName::Third),
                    },
                ];
                (run, effects)
            }

            (
                RunPhase::ThirdRunning,
                RunEvent::StageFinished {
                    stage: StageName::Third,
                    ..
                },
            ) => {
                let run = Run {
                    phase: RunPhase::AwaitingSecondSignal,
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Notice {
                        message: "Third process is done".to_string(),
                    },
                    Effect::LaunchSignal {
                        source: SignalKind::SecondNotification,
                        payload: SignalPayload::new(
                            self.second_channel.clone(),
                            self.second_token.clone(),
                        ),
                    },
                ];
                (run, effects)
            }

            (
                RunPhase::AwaitingSecondSignal,
                RunEvent::SignalCompleted {
                    source: SignalKind::SecondNotification,
                    channel_id,
                    token,
                },
            ) if token == self.second_token => {
                let run = Run {
                    phase: RunPhase::Done,
                    completed_at: Some(clock.now()),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::Notice {
                        message: format!(
                            "Second notification service finished for ID {}",
                            channel_id
                        ),
                    },
                    Effect::Emit(Event::RunCompleted {
                        run_id: self.id.0.clone(),
                    }),
                ];
                (run, effects)
            }

            // Everything else: duplicate terminal notifications, stale or
            // foreign tokens, events in the wrong phase.
            _ => (self.clone(), vec![]),
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    /// Token the run expects from the first signal source
    pub fn first_token(&self) -> &SignalToken {
        &self.first_token
    }

    /// Token the run expects from the second signal source
    pub fn second_token(&self) -> &SignalToken {
        &self.second_token
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
