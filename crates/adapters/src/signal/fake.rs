// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake signal adapter for tests

use super::{SignalAdapter, SignalError};
use async_trait::async_trait;
use relay_core::signal::{SignalKind, SignalPayload};
use std::sync::{Arc, Mutex};

/// One recorded launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalCall {
    pub kind: SignalKind,
    pub payload: SignalPayload,
}

/// Records launches instead of starting processes
#[derive(Clone, Default)]
pub struct FakeSignalAdapter {
    calls: Arc<Mutex<Vec<SignalCall>>>,
}

impl FakeSignalAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SignalCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn launches_of(&self, kind: SignalKind) -> Vec<SignalPayload> {
        self.calls()
            .into_iter()
            .filter(|call| call.kind == kind)
            .map(|call| call.payload)
            .collect()
    }
}

#[async_trait]
impl SignalAdapter for FakeSignalAdapter {
    async fn launch(&self, kind: SignalKind, payload: SignalPayload) -> Result<(), SignalError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SignalCall { kind, payload });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::signal::SignalToken;

    #[tokio::test]
    async fn records_launches_by_kind() {
        let signals = FakeSignalAdapter::new();
        signals
            .launch(
                SignalKind::Notification,
                SignalPayload::new("001", SignalToken::from("t1")),
            )
            .await
            .unwrap();
        signals
            .launch(
                SignalKind::SecondNotification,
                SignalPayload::new("002", SignalToken::from("t2")),
            )
            .await
            .unwrap();

        assert_eq!(signals.calls().len(), 2);
        let first = signals.launches_of(SignalKind::Notification);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].channel_id, "001");
    }
}
