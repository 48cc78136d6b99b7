// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: Core library for the Relay pipeline orchestrator
//!
//! This crate provides:
//! - The pure state machine driving the five-stage pipeline run
//! - Stage descriptors, signal payloads, events, and effects
//! - An event bus with pattern subscriptions
//! - TOML configuration

pub mod clock;
pub mod id;

pub mod config;
pub mod events;

pub mod effect;
pub mod event;
pub mod run;
pub mod signal;
pub mod stage;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, RelayConfig, SignalConfig, StageConfig};
pub use effect::Effect;
pub use event::Event;
pub use events::{EventBus, EventPattern, SubscriberId, Subscription};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use run::{Run, RunEvent, RunId, RunPhase};
pub use signal::{SignalKind, SignalPayload, SignalToken};
pub use stage::{Constraint, StageDescriptor, StageHandle, StageName, StageState};
