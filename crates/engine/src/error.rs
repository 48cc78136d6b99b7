// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use relay_adapters::notify::NotifyError;
use relay_adapters::queue::QueueError;
use relay_adapters::signal::SignalError;

/// Failure applying one effect
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Failure driving a run
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("event channel closed before the run completed")]
    ChannelClosed,
}
