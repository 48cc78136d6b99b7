// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task queue substrate
//!
//! The engine hands stages to a queue that owns scheduling: chains run in
//! order, constraints gate execution, and terminal states are observable per
//! handle. The engine never reaches around the queue to run a stage itself.

use async_trait::async_trait;
use relay_core::stage::{StageDescriptor, StageHandle, StageState};
use tokio::sync::mpsc;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

/// Stream of lifecycle states for one submitted stage
pub type LifecycleStream = mpsc::UnboundedReceiver<StageState>;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("unknown stage handle: {0}")]
    UnknownHandle(String),

    #[error("queue rejected submission: {0}")]
    Rejected(String),
}

/// Interface to the task queue substrate
#[async_trait]
pub trait QueueAdapter: Clone + Send + Sync + 'static {
    /// Submit stages as an ordered chain; each stage waits for its
    /// predecessor to reach a terminal state
    async fn submit_chain(
        &self,
        stages: Vec<StageDescriptor>,
    ) -> Result<Vec<StageHandle>, QueueError>;

    /// Submit a single stage
    async fn submit(&self, stage: StageDescriptor) -> Result<StageHandle, QueueError>;

    /// Observe lifecycle states for a submitted stage. The current state is
    /// delivered immediately, so observers attached after a terminal state
    /// still see it.
    fn observe(&self, handle: &StageHandle) -> Result<LifecycleStream, QueueError>;
}
