// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Constraint probes
//!
//! Stages can declare constraints that must hold before they run. The queue
//! polls a probe and defers execution until every constraint is satisfied.

use async_trait::async_trait;
use relay_core::stage::Constraint;
use std::time::Duration;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Checks whether stage constraints currently hold
#[async_trait]
pub trait ConstraintProbe: Clone + Send + Sync + 'static {
    async fn is_satisfied(&self, constraint: &Constraint) -> bool;

    /// Wait until every constraint holds, polling
    async fn wait_satisfied(&self, constraints: &[Constraint]) {
        loop {
            let mut all = true;
            for constraint in constraints {
                if !self.is_satisfied(constraint).await {
                    all = false;
                    break;
                }
            }
            if all {
                return;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Probe that reports every constraint as satisfied
#[derive(Clone, Default)]
pub struct AlwaysSatisfiedProbe;

#[async_trait]
impl ConstraintProbe for AlwaysSatisfiedProbe {
    async fn is_satisfied(&self, _constraint: &Constraint) -> bool {
        true
    }
}

/// Checks network connectivity by opening a TCP connection
#[derive(Clone)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new("1.1.1.1:53", Duration::from_secs(2))
    }
}

#[async_trait]
impl ConstraintProbe for TcpProbe {
    async fn is_satisfied(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::NetworkConnected => {
                let connect = tokio::net::TcpStream::connect(&self.target);
                matches!(
                    tokio::time::timeout(self.timeout, connect).await,
                    Ok(Ok(_))
                )
            }
        }
    }
}
