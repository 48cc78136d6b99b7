// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task stage descriptors and lifecycle states
//!
//! A stage is one deferred unit of work submitted to the task-queue
//! substrate, gated by a constraint and reporting a terminal lifecycle
//! state. The correlation id travels in the input payload under a
//! stage-specific key; stage output is never threaded into later inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input-payload key for the first stage
pub const FIRST_INPUT_KEY: &str = "first_process_id";
/// Input-payload key for the second stage
pub const SECOND_INPUT_KEY: &str = "second_process_id";
/// Input-payload key for the third stage
pub const THIRD_INPUT_KEY: &str = "third_process_id";

/// The three task stages of the pipeline, in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    First,
    Second,
    Third,
}

impl StageName {
    /// The stage-specific key under which the correlation id is passed
    pub fn input_key(&self) -> &'static str {
        match self {
            StageName::First => FIRST_INPUT_KEY,
            StageName::Second => SECOND_INPUT_KEY,
            StageName::Third => THIRD_INPUT_KEY,
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageName::First => "first",
            StageName::Second => "second",
            StageName::Third => "third",
        };
        write!(f, "{}", name)
    }
}

/// A named predicate over environment state, evaluated by the queue
/// substrate before a stage becomes eligible to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Only run while network connectivity is present
    NetworkConnected,
}

/// Opaque identifier for a submitted stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageHandle(pub String);

impl std::fmt::Display for StageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a submitted stage
///
/// Terminal states are final. Observers may receive a terminal state more
/// than once and must react idempotently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageState {
    /// Accepted by the queue; waiting for its constraints (and, in a chain,
    /// its predecessor's terminal state)
    Enqueued,
    /// Released to run
    Running,
    /// Finished successfully
    Succeeded,
    /// Finished with an error
    Failed { reason: String },
}

impl StageState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StageState::Succeeded | StageState::Failed { .. })
    }
}

/// Descriptor for one unit of deferred work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub name: StageName,
    /// Input payload: one stage-specific key mapping to the correlation id
    pub input: HashMap<String, String>,
    pub constraints: Vec<Constraint>,
    pub created_at: DateTime<Utc>,
}

impl StageDescriptor {
    /// Build a descriptor carrying the correlation id under the stage's
    /// input key
    pub fn new(name: StageName, correlation_id: impl Into<String>) -> Self {
        let mut input = HashMap::new();
        input.insert(name.input_key().to_string(), correlation_id.into());
        Self {
            name,
            input,
            constraints: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// The correlation id this stage was built with
    pub fn correlation_id(&self) -> Option<&str> {
        self.input.get(self.name.input_key()).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
