// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor
//!
//! Applies the effects the run state machine requests against the adapters,
//! and wires stage submissions back into the event loop by watching each
//! handle for terminal lifecycle states.

use crate::error::ExecuteError;
use relay_adapters::notify::NotifyAdapter;
use relay_adapters::queue::QueueAdapter;
use relay_adapters::signal::SignalAdapter;
use relay_core::effect::Effect;
use relay_core::event::Event;
use relay_core::events::EventBus;
use relay_core::stage::{StageHandle, StageName};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::Instrument;

pub struct Executor<Q, G, N> {
    queue: Q,
    signals: G,
    notify: N,
    bus: EventBus,
    notice_channel: String,
    events: mpsc::UnboundedSender<Event>,
}

impl<Q, G, N> Executor<Q, G, N>
where
    Q: QueueAdapter,
    G: SignalAdapter,
    N: NotifyAdapter,
{
    pub fn new(
        queue: Q,
        signals: G,
        notify: N,
        bus: EventBus,
        notice_channel: impl Into<String>,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            queue,
            signals,
            notify,
            bus,
            notice_channel: notice_channel.into(),
            events,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Apply one effect
    pub async fn execute(&self, effect: Effect) -> Result<(), ExecuteError> {
        let span = tracing::debug_span!("execute", effect = effect.name());
        async {
            let start = Instant::now();
            let result = self.execute_inner(effect).await;

            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "effect applied"),
                Err(error) => tracing::error!(elapsed_ms, %error, "effect failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Apply effects in order, stopping at the first failure
    pub async fn execute_all(&self, effects: Vec<Effect>) -> Result<(), ExecuteError> {
        for effect in effects {
            self.execute(effect).await?;
        }
        Ok(())
    }

    async fn execute_inner(&self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::Emit(event) => {
                self.bus.publish(event);
            }

            Effect::Notice { message } => {
                tracing::info!(notice = %message);
                self.notify.send(&self.notice_channel, &message).await?;
            }

            Effect::SubmitChain { stages } => {
                let names: Vec<StageName> = stages.iter().map(|s| s.name).collect();
                let handles = self.queue.submit_chain(stages).await?;
                for (name, handle) in names.into_iter().zip(handles) {
                    self.watch_stage(name, handle.clone())?;
                    self.bus.publish(Event::StageSubmitted {
                        stage: name,
                        handle,
                    });
                }
            }

            Effect::SubmitStage { stage } => {
                let name = stage.name;
                let handle = self.queue.submit(stage).await?;
                self.watch_stage(name, handle.clone())?;
                self.bus.publish(Event::StageSubmitted {
                    stage: name,
                    handle,
                });
            }

            Effect::LaunchSignal { source, payload } => {
                let channel_id = payload.channel_id.clone();
                let token = payload.token.clone();
                self.signals.launch(source, payload).await?;
                self.bus.publish(Event::SignalLaunched {
                    source,
                    channel_id,
                    token,
                });
            }
        }
        Ok(())
    }

    /// Forward every terminal lifecycle state of the handle into the event
    /// loop. Duplicates are forwarded as-is; the state machine absorbs them.
    fn watch_stage(&self, stage: StageName, handle: StageHandle) -> Result<(), ExecuteError> {
        let mut stream = self.queue.observe(&handle)?;
        let events = self.events.clone();
        tokio::spawn(async move {
            while let Some(state) = stream.recv().await {
                if state.is_terminal() {
                    tracing::debug!(%handle, %stage, "stage reached terminal state");
                    if events.send(Event::StageFinished { stage, state }).is_err() {
                        break;
                    }
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
