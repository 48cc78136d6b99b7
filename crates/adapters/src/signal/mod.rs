// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal source launcher
//!
//! Launching a signal source starts a foreground process; when it exits, the
//! adapter publishes a completion event carrying the channel id and the token
//! from the launch payload. The adapter never decides what the completion
//! means; the run state machine does.

use async_trait::async_trait;
use relay_core::event::Event;
use relay_core::signal::{SignalKind, SignalPayload};
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::mpsc;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("failed to launch {kind} signal source: {message}")]
    Launch { kind: SignalKind, message: String },
}

/// Interface for launching signal sources
#[async_trait]
pub trait SignalAdapter: Clone + Send + Sync + 'static {
    async fn launch(&self, kind: SignalKind, payload: SignalPayload) -> Result<(), SignalError>;
}

/// Runs each signal source as a child process and publishes its completion
/// when the process exits
#[derive(Clone)]
pub struct ProcessSignalAdapter {
    commands: HashMap<SignalKind, String>,
    events: mpsc::UnboundedSender<Event>,
}

impl ProcessSignalAdapter {
    pub fn new(
        commands: HashMap<SignalKind, String>,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self { commands, events }
    }

    fn command_for(&self, kind: SignalKind) -> String {
        self.commands
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| "sleep 1".to_string())
    }
}

#[async_trait]
impl SignalAdapter for ProcessSignalAdapter {
    async fn launch(&self, kind: SignalKind, payload: SignalPayload) -> Result<(), SignalError> {
        let command = self.command_for(kind);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .envs(payload.to_data())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SignalError::Launch {
                kind,
                message: e.to_string(),
            })?;

        tracing::info!(source = %kind, channel_id = %payload.channel_id, "signal source launched");

        let events = self.events.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    tracing::info!(source = %kind, %status, "signal source exited");
                }
                Err(error) => {
                    tracing::warn!(source = %kind, %error, "failed to wait for signal source");
                }
            }
            let _ = events.send(Event::SignalCompleted {
                source: kind,
                channel_id: payload.channel_id,
                token: payload.token,
            });
        });

        Ok(())
    }
}
