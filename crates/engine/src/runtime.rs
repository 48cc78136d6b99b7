// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run driver
//!
//! Feeds observed events through the run state machine and executes the
//! effects each transition requests, until the run reaches its final phase.

use crate::error::RuntimeError;
use crate::executor::Executor;
use relay_adapters::notify::NotifyAdapter;
use relay_adapters::queue::QueueAdapter;
use relay_adapters::signal::SignalAdapter;
use relay_core::clock::Clock;
use relay_core::event::Event;
use relay_core::events::EventBus;
use relay_core::run::{Run, RunEvent, RunPhase};
use relay_core::stage::StageState;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Adapters a runtime is built from
pub struct RuntimeDeps<Q, G, N> {
    pub queue: Q,
    pub signals: G,
    pub notify: N,
}

pub struct Runtime<Q, G, N, C> {
    executor: Executor<Q, G, N>,
    run: Mutex<Run>,
    clock: C,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl<Q, G, N, C> Runtime<Q, G, N, C>
where
    Q: QueueAdapter,
    G: SignalAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    /// Build a runtime around one run
    ///
    /// `events_tx` is the same sender handed to adapters that push events
    /// back in (the signal adapter, the executor's stage watchers).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        deps: RuntimeDeps<Q, G, N>,
        run: Run,
        bus: EventBus,
        clock: C,
        events_tx: mpsc::UnboundedSender<Event>,
        events_rx: mpsc::UnboundedReceiver<Event>,
        notice_channel: impl Into<String>,
    ) -> Self {
        let executor = Executor::new(
            deps.queue,
            deps.signals,
            deps.notify,
            bus,
            notice_channel,
            events_tx,
        );
        Self {
            executor,
            run: Mutex::new(run),
            clock,
            events_rx,
        }
    }

    pub fn bus(&self) -> &EventBus {
        self.executor.bus()
    }

    /// Begin the run: submits the opening chain
    pub async fn start(&self) -> Result<(), RuntimeError> {
        self.apply(RunEvent::Start).await
    }

    /// React to one observed event
    pub async fn handle_event(&self, event: Event) -> Result<(), RuntimeError> {
        let run_event = match event {
            Event::StageFinished { stage, state } => {
                if let StageState::Failed { reason } = &state {
                    // A failed stage still advances the pipeline; the failure
                    // is only surfaced here.
                    tracing::warn!(%stage, %reason, "stage failed; advancing anyway");
                }
                RunEvent::StageFinished { stage, state }
            }
            Event::SignalCompleted {
                source,
                channel_id,
                token,
            } => RunEvent::SignalCompleted {
                source,
                channel_id,
                token,
            },
            // Descriptive events published on the bus need no reaction
            _ => return Ok(()),
        };
        self.apply(run_event).await
    }

    async fn apply(&self, event: RunEvent) -> Result<(), RuntimeError> {
        let effects = {
            let mut run = self.run.lock().unwrap_or_else(|e| e.into_inner());
            let (next, effects) = run.transition(event, &self.clock);
            *run = next;
            effects
        };
        self.executor.execute_all(effects).await?;
        Ok(())
    }

    /// Drive the run until it completes
    pub async fn run_to_completion(&mut self) -> Result<(), RuntimeError> {
        self.start().await?;
        while !self.is_done() {
            let event = self
                .events_rx
                .recv()
                .await
                .ok_or(RuntimeError::ChannelClosed)?;
            self.handle_event(event).await?;
        }
        let run = self.snapshot();
        tracing::info!(run_id = %run.id, "run completed");
        Ok(())
    }

    pub fn phase(&self) -> RunPhase {
        self.run.lock().unwrap_or_else(|e| e.into_inner()).phase
    }

    pub fn is_done(&self) -> bool {
        self.run.lock().unwrap_or_else(|e| e.into_inner()).is_done()
    }

    pub fn snapshot(&self) -> Run {
        self.run.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
