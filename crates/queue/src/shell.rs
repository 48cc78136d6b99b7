//! Stage runners
//!
//! The queue delegates the actual work of a stage to a runner. Production
//! uses [`ShellStageRunner`]; tests use [`InstantStageRunner`] or their own
//! recording runners.

use async_trait::async_trait;
use relay_core::stage::{StageDescriptor, StageName};
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("stage exited with code {code}")]
    ExitCode { code: i32 },

    #[error("failed to spawn stage: {0}")]
    Spawn(String),
}

/// Executes the work of one stage
#[async_trait]
pub trait StageRunner: Clone + Send + Sync + 'static {
    async fn run(&self, stage: &StageDescriptor) -> Result<(), StageError>;
}

/// Runner that succeeds immediately without doing anything
#[derive(Clone, Default)]
pub struct InstantStageRunner;

#[async_trait]
impl StageRunner for InstantStageRunner {
    async fn run(&self, _stage: &StageDescriptor) -> Result<(), StageError> {
        Ok(())
    }
}

/// Runs each stage as a shell command with the stage input as environment
#[derive(Clone, Default)]
pub struct ShellStageRunner {
    commands: HashMap<StageName, String>,
}

impl ShellStageRunner {
    pub fn new(commands: HashMap<StageName, String>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl StageRunner for ShellStageRunner {
    async fn run(&self, stage: &StageDescriptor) -> Result<(), StageError> {
        let Some(command) = self.commands.get(&stage.name) else {
            // No command configured means the stage is a pure ordering point
            return Ok(());
        };

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(stage.input.clone())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| StageError::Spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!(stage = %stage.name, output = %stdout.trim(), "stage stdout");
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(stage = %stage.name, output = %stderr.trim(), "stage stderr");
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(StageError::ExitCode {
                code: output.status.code().unwrap_or(-1),
            })
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
