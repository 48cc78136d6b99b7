// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing notices
//!
//! The engine surfaces progress messages ("First process is done", ...)
//! through this adapter. Delivery is best effort; a run never fails because a
//! notice could not be shown.

use async_trait::async_trait;
use tokio::process::Command;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to deliver notice: {0}")]
    Delivery(String),
}

/// Interface for delivering progress notices
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notify adapter that does nothing
#[derive(Clone, Default)]
pub struct NoOpNotifyAdapter;

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn send(&self, _channel: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Delivers notices through the desktop notification command if one exists,
/// falling back to a log line
#[derive(Clone, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    #[cfg(target_os = "macos")]
    fn command(channel: &str, message: &str) -> Command {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(format!(
            "display notification \"{}\" with title \"relay {}\"",
            message.replace('"', "'"),
            channel
        ));
        cmd
    }

    #[cfg(not(target_os = "macos"))]
    fn command(channel: &str, message: &str) -> Command {
        let mut cmd = Command::new("notify-send");
        cmd.arg(format!("relay {}", channel)).arg(message);
        cmd
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        let status = Self::command(channel, message)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            // No notifier installed, or it refused the notice. The log line
            // from the engine already carries the message.
            Ok(status) => {
                tracing::debug!(channel, %status, "desktop notifier exited nonzero");
            }
            Err(error) => {
                tracing::debug!(channel, %error, "desktop notifier unavailable");
            }
        }
        Ok(())
    }
}
