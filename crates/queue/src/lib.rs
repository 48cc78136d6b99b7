// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-queue: in-process task queue substrate
//!
//! Implements the queue contract the engine depends on: ordered chains,
//! constraint-gated execution, and per-handle lifecycle observation that
//! replays the current state to late observers.

mod queue;
mod shell;

pub use queue::TaskQueue;
pub use shell::{InstantStageRunner, ShellStageRunner, StageError, StageRunner};
