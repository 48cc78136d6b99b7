// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake constraint probe for tests

use super::ConstraintProbe;
use async_trait::async_trait;
use relay_core::stage::Constraint;
use std::sync::Arc;
use tokio::sync::watch;

/// Probe whose answer tests flip at will
#[derive(Clone)]
pub struct FakeProbe {
    online: Arc<watch::Sender<bool>>,
}

impl FakeProbe {
    pub fn online() -> Self {
        Self::with_state(true)
    }

    pub fn offline() -> Self {
        Self::with_state(false)
    }

    fn with_state(online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        Self {
            online: Arc::new(tx),
        }
    }

    pub fn set_online(&self, online: bool) {
        let _ = self.online.send(online);
    }
}

#[async_trait]
impl ConstraintProbe for FakeProbe {
    async fn is_satisfied(&self, _constraint: &Constraint) -> bool {
        *self.online.borrow()
    }

    // Wake on state flips instead of polling so tests stay fast
    async fn wait_satisfied(&self, constraints: &[Constraint]) {
        if constraints.is_empty() {
            return;
        }
        let mut rx = self.online.subscribe();
        while !*rx.borrow() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_current_state() {
        let probe = FakeProbe::offline();
        assert!(!probe.is_satisfied(&Constraint::NetworkConnected).await);

        probe.set_online(true);
        assert!(probe.is_satisfied(&Constraint::NetworkConnected).await);
    }

    #[tokio::test]
    async fn wait_satisfied_wakes_on_flip() {
        let probe = FakeProbe::offline();
        let waiter = {
            let probe = probe.clone();
            tokio::spawn(async move {
                probe.wait_satisfied(&[Constraint::NetworkConnected]).await;
            })
        };

        tokio::task::yield_now().await;
        probe.set_online(true);
        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
