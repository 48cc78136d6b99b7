// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-engine: drives a pipeline run to completion
//!
//! The [`Runtime`] owns the run state machine and an [`Executor`] that turns
//! its effects into adapter calls. Stage terminal states and signal
//! completions flow back in as events, each of which is fed through the state
//! machine until the run is done.

mod error;
mod executor;
mod runtime;

pub use error::{ExecuteError, RuntimeError};
pub use executor::Executor;
pub use runtime::{Runtime, RuntimeDeps};
