// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing wrappers for adapters

use crate::notify::{NotifyAdapter, NotifyError};
use crate::signal::{SignalAdapter, SignalError};
use async_trait::async_trait;
use relay_core::signal::{SignalKind, SignalPayload};
use std::time::Instant;
use tracing::Instrument;

/// Wraps a signal adapter with span-scoped logging
#[derive(Clone)]
pub struct TracedSignalAdapter<G> {
    inner: G,
}

impl<G: SignalAdapter> TracedSignalAdapter<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: SignalAdapter> SignalAdapter for TracedSignalAdapter<G> {
    async fn launch(&self, kind: SignalKind, payload: SignalPayload) -> Result<(), SignalError> {
        let span = tracing::info_span!("signal_launch", source = %kind, channel_id = %payload.channel_id);
        async {
            let start = Instant::now();
            let result = self.inner.launch(kind, payload).await;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "signal launch accepted"),
                Err(error) => tracing::error!(elapsed_ms, %error, "signal launch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wraps a notify adapter with span-scoped logging
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N: NotifyAdapter> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notice", channel);
        async {
            let result = self.inner.send(channel, message).await;
            if let Err(error) = &result {
                tracing::warn!(%error, "notice delivery failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
