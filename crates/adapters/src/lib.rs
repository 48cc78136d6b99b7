// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-adapters: boundary traits between the orchestration engine and the
//! outside world, with real and fake implementations.
//!
//! Each adapter has:
//! - A trait defining the interface
//! - A production implementation
//! - A fake implementation for tests (behind the `test-support` feature)

pub mod notify;
pub mod probe;
pub mod queue;
pub mod signal;
pub mod traced;

pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use probe::{AlwaysSatisfiedProbe, ConstraintProbe, TcpProbe};
pub use queue::{LifecycleStream, QueueAdapter, QueueError};
pub use signal::{ProcessSignalAdapter, SignalAdapter, SignalError};
pub use traced::{TracedNotifyAdapter, TracedSignalAdapter};

#[cfg(any(test, feature = "test-support"))]
pub use notify::fake::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use probe::fake::FakeProbe;
#[cfg(any(test, feature = "test-support"))]
pub use queue::fake::{FakeQueueAdapter, QueueCall};
#[cfg(any(test, feature = "test-support"))]
pub use signal::fake::{FakeSignalAdapter, SignalCall};
