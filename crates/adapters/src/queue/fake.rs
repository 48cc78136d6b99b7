// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake queue adapter for tests
//!
//! Records submissions and lets tests push lifecycle states by hand.

use super::{LifecycleStream, QueueAdapter, QueueError};
use async_trait::async_trait;
use relay_core::stage::{StageDescriptor, StageHandle, StageName, StageState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// One recorded queue operation
#[derive(Debug, Clone)]
pub enum QueueCall {
    SubmitChain(Vec<StageDescriptor>),
    Submit(StageDescriptor),
    Observe(StageHandle),
}

struct HandleEntry {
    stage: StageName,
    state: StageState,
    senders: Vec<mpsc::UnboundedSender<StageState>>,
}

#[derive(Default)]
struct Inner {
    calls: Vec<QueueCall>,
    handles: HashMap<StageHandle, HandleEntry>,
    next_id: u64,
}

/// Queue adapter that never runs anything
#[derive(Clone, Default)]
pub struct FakeQueueAdapter {
    inner: Arc<Mutex<Inner>>,
}

impl FakeQueueAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<QueueCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Every stage submitted so far, chain or single, in order
    pub fn submitted_stages(&self) -> Vec<StageDescriptor> {
        self.calls()
            .into_iter()
            .flat_map(|call| match call {
                QueueCall::SubmitChain(stages) => stages,
                QueueCall::Submit(stage) => vec![stage],
                QueueCall::Observe(_) => vec![],
            })
            .collect()
    }

    /// Handle assigned to the first submission of the given stage
    pub fn handle_for(&self, name: StageName) -> Option<StageHandle> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut handles: Vec<_> = inner
            .handles
            .iter()
            .filter(|(_, entry)| entry.stage == name)
            .map(|(handle, _)| handle.clone())
            .collect();
        handles.sort_by(|a, b| a.0.cmp(&b.0));
        handles.into_iter().next()
    }

    /// Push a lifecycle state to every observer of the handle
    pub fn push_state(&self, handle: &StageHandle, state: StageState) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = inner.handles.get_mut(handle) {
            entry.state = state.clone();
            entry
                .senders
                .retain(|tx| tx.send(state.clone()).is_ok());
        }
    }

    fn register(inner: &mut Inner, stage: &StageDescriptor) -> StageHandle {
        inner.next_id += 1;
        let handle = StageHandle(format!("stage-{}", inner.next_id));
        inner.handles.insert(
            handle.clone(),
            HandleEntry {
                stage: stage.name,
                state: StageState::Enqueued,
                senders: Vec::new(),
            },
        );
        handle
    }
}

#[async_trait]
impl QueueAdapter for FakeQueueAdapter {
    async fn submit_chain(
        &self,
        stages: Vec<StageDescriptor>,
    ) -> Result<Vec<StageHandle>, QueueError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(QueueCall::SubmitChain(stages.clone()));
        Ok(stages
            .iter()
            .map(|stage| Self::register(&mut inner, stage))
            .collect())
    }

    async fn submit(&self, stage: StageDescriptor) -> Result<StageHandle, QueueError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(QueueCall::Submit(stage.clone()));
        Ok(Self::register(&mut inner, &stage))
    }

    fn observe(&self, handle: &StageHandle) -> Result<LifecycleStream, QueueError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(QueueCall::Observe(handle.clone()));
        let entry = inner
            .handles
            .get_mut(handle)
            .ok_or_else(|| QueueError::UnknownHandle(handle.0.clone()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(entry.state.clone());
        entry.senders.push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: StageName) -> StageDescriptor {
        StageDescriptor::new(name, "001")
    }

    #[tokio::test]
    async fn assigns_sequential_handles() {
        let queue = FakeQueueAdapter::new();
        let handles = queue
            .submit_chain(vec![stage(StageName::First), stage(StageName::Second)])
            .await
            .unwrap();
        assert_eq!(handles[0].0, "stage-1");
        assert_eq!(handles[1].0, "stage-2");

        let third = queue.submit(stage(StageName::Third)).await.unwrap();
        assert_eq!(third.0, "stage-3");
        assert_eq!(queue.handle_for(StageName::Third), Some(third));
    }

    #[tokio::test]
    async fn observe_delivers_current_then_pushed_states() {
        let queue = FakeQueueAdapter::new();
        let handle = queue.submit(stage(StageName::First)).await.unwrap();

        let mut stream = queue.observe(&handle).unwrap();
        assert_eq!(stream.recv().await, Some(StageState::Enqueued));

        queue.push_state(&handle, StageState::Succeeded);
        assert_eq!(stream.recv().await, Some(StageState::Succeeded));
    }

    #[tokio::test]
    async fn observe_unknown_handle_errors() {
        let queue = FakeQueueAdapter::new();
        let err = queue
            .observe(&StageHandle("stage-99".to_string()))
            .unwrap_err();
        assert!(matches!(err, QueueError::UnknownHandle(_)));
    }
}
