// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relayd: runs one five-stage pipeline to completion
//!
//! Usage: `relayd [config.toml]`. Without a config every stage is a no-op
//! and each signal source sleeps briefly before completing, which makes a
//! bare invocation a working end-to-end demonstration.

use relay_adapters::notify::DesktopNotifyAdapter;
use relay_adapters::probe::TcpProbe;
use relay_adapters::signal::ProcessSignalAdapter;
use relay_adapters::traced::{TracedNotifyAdapter, TracedSignalAdapter};
use relay_core::clock::SystemClock;
use relay_core::config::RelayConfig;
use relay_core::events::EventBus;
use relay_core::id::UuidIdGen;
use relay_core::run::Run;
use relay_core::signal::SignalKind;
use relay_core::stage::StageName;
use relay_engine::{Runtime, RuntimeDeps};
use relay_queue::{ShellStageRunner, TaskQueue};
use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const NOTICE_CHANNEL: &str = "relay";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Result<RelayConfig, relay_core::config::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => RelayConfig::load(Path::new(&path)),
        None => Ok(RelayConfig::default()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let mut stage_commands = HashMap::new();
    for name in [StageName::First, StageName::Second, StageName::Third] {
        stage_commands.insert(name, config.stage_command(&name.to_string()));
    }
    let mut signal_commands = HashMap::new();
    signal_commands.insert(
        SignalKind::Notification,
        config.signal_command("notification"),
    );
    signal_commands.insert(
        SignalKind::SecondNotification,
        config.signal_command("second_notification"),
    );

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let queue = TaskQueue::new(TcpProbe::default(), ShellStageRunner::new(stage_commands));
    let signals = TracedSignalAdapter::new(ProcessSignalAdapter::new(
        signal_commands,
        events_tx.clone(),
    ));
    let notify = TracedNotifyAdapter::new(DesktopNotifyAdapter);

    let bus = EventBus::new();
    let mut tap = bus.tap();
    tokio::spawn(async move {
        while let Some(event) = tap.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => tracing::info!(event = %json, "event"),
                Err(error) => tracing::warn!(%error, "failed to serialize event"),
            }
        }
    });

    let run = Run::new(
        config.correlation_id.clone(),
        config.signal_channel("notification"),
        config.signal_channel("second_notification"),
        &UuidIdGen,
    );
    tracing::info!(run_id = %run.id, correlation_id = %run.correlation_id, "starting run");

    let mut runtime = Runtime::new(
        RuntimeDeps {
            queue,
            signals,
            notify,
        },
        run,
        bus,
        SystemClock,
        events_tx,
        events_rx,
        NOTICE_CHANNEL,
    );

    match runtime.run_to_completion().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "run failed");
            ExitCode::FAILURE
        }
    }
}
