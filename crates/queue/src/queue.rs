// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process task queue
//!
//! Owns stage scheduling end to end: handles are assigned at submission,
//! chains run strictly in order on one driver task, constraints gate release,
//! and every lifecycle transition is fanned out to observers. A failed stage
//! still releases its successor; ordering is the only guarantee a chain adds.

use crate::shell::StageRunner;
use async_trait::async_trait;
use relay_adapters::probe::ConstraintProbe;
use relay_adapters::queue::{LifecycleStream, QueueAdapter, QueueError};
use relay_core::stage::{StageDescriptor, StageHandle, StageState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

struct HandleEntry {
    state: StageState,
    observers: Vec<mpsc::UnboundedSender<StageState>>,
}

#[derive(Default)]
struct Inner {
    handles: HashMap<StageHandle, HandleEntry>,
    next_id: u64,
}

/// Task queue backed by a constraint probe and a stage runner
#[derive(Clone)]
pub struct TaskQueue<P, R> {
    probe: P,
    runner: R,
    inner: Arc<Mutex<Inner>>,
}

impl<P, R> TaskQueue<P, R>
where
    P: ConstraintProbe,
    R: StageRunner,
{
    pub fn new(probe: P, runner: R) -> Self {
        Self {
            probe,
            runner,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn register(&self, stage: &StageDescriptor) -> StageHandle {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let handle = StageHandle(format!("stage-{}", inner.next_id));
        inner.handles.insert(
            handle.clone(),
            HandleEntry {
                state: StageState::Enqueued,
                observers: Vec::new(),
            },
        );
        tracing::debug!(%handle, stage = %stage.name, "stage registered");
        handle
    }

    fn publish(inner: &Arc<Mutex<Inner>>, handle: &StageHandle, state: StageState) {
        let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = inner.handles.get_mut(handle) {
            entry.state = state.clone();
            entry
                .observers
                .retain(|tx| tx.send(state.clone()).is_ok());
        }
    }

    /// Gate on constraints, run, publish the terminal state
    async fn run_stage(&self, handle: StageHandle, stage: StageDescriptor) {
        self.probe.wait_satisfied(&stage.constraints).await;
        Self::publish(&self.inner, &handle, StageState::Running);
        tracing::info!(%handle, stage = %stage.name, "stage running");

        match self.runner.run(&stage).await {
            Ok(()) => {
                tracing::info!(%handle, stage = %stage.name, "stage succeeded");
                Self::publish(&self.inner, &handle, StageState::Succeeded);
            }
            Err(error) => {
                tracing::warn!(%handle, stage = %stage.name, %error, "stage failed");
                Self::publish(
                    &self.inner,
                    &handle,
                    StageState::Failed {
                        reason: error.to_string(),
                    },
                );
            }
        }
    }
}

#[async_trait]
impl<P, R> QueueAdapter for TaskQueue<P, R>
where
    P: ConstraintProbe,
    R: StageRunner,
{
    async fn submit_chain(
        &self,
        stages: Vec<StageDescriptor>,
    ) -> Result<Vec<StageHandle>, QueueError> {
        if stages.is_empty() {
            return Err(QueueError::Rejected("empty chain".to_string()));
        }

        let handles: Vec<StageHandle> = stages.iter().map(|s| self.register(s)).collect();

        // One driver task per chain keeps the ordering guarantee: a stage is
        // not released until its predecessor reached a terminal state.
        let queue = self.clone();
        let chain: Vec<(StageHandle, StageDescriptor)> =
            handles.iter().cloned().zip(stages).collect();
        tokio::spawn(async move {
            for (handle, stage) in chain {
                queue.run_stage(handle, stage).await;
            }
        });

        Ok(handles)
    }

    async fn submit(&self, stage: StageDescriptor) -> Result<StageHandle, QueueError> {
        let handle = self.register(&stage);
        let queue = self.clone();
        let task_handle = handle.clone();
        tokio::spawn(async move {
            queue.run_stage(task_handle, stage).await;
        });
        Ok(handle)
    }

    fn observe(&self, handle: &StageHandle) -> Result<LifecycleStream, QueueError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let entry = inner
            .handles
            .get_mut(handle)
            .ok_or_else(|| QueueError::UnknownHandle(handle.0.clone()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(entry.state.clone());
        entry.observers.push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
