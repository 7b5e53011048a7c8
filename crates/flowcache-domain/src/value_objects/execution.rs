//! Workflow execution records
//!
//! The execution dispatcher owns these records; the cache keeps a
//! short-lived copy whose TTL depends on [`ExecutionStatus`].

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a workflow execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Currently executing nodes
    Running,
    /// Paused on a wait node or webhook
    Waiting,
    /// Finished without error
    Success,
    /// Finished with an error
    Error,
}

impl ExecutionStatus {
    /// Whether the execution has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "waiting" => Ok(Self::Waiting),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(Error::invalid_argument(format!(
                "Unknown execution status: {other}"
            ))),
        }
    }
}

/// Cached snapshot of a workflow execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Execution id
    pub id: String,
    /// Workflow the execution belongs to
    pub workflow_id: String,
    /// Current lifecycle state
    pub status: ExecutionStatus,
    /// When the execution started
    pub started_at: DateTime<Utc>,
    /// When the execution reached a terminal state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
    /// Milliseconds between `started_at` and `stopped_at`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Opaque execution data (node outputs, error details)
    #[serde(default)]
    pub payload: Value,
}

impl ExecutionRecord {
    /// Create a record without payload or stop information
    pub fn new<I, W>(id: I, workflow_id: W, status: ExecutionStatus, started_at: DateTime<Utc>) -> Self
    where
        I: Into<String>,
        W: Into<String>,
    {
        Self {
            id: id.into(),
            workflow_id: workflow_id.into(),
            status,
            started_at,
            stopped_at: None,
            duration: None,
            payload: Value::Null,
        }
    }

    /// Attach an execution payload
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Move the record to `status` at instant `now`
    ///
    /// Entering a terminal state stamps `stopped_at` and `duration`. A record
    /// that already stopped keeps its original stop stamp.
    pub fn transition_to(&mut self, status: ExecutionStatus, now: DateTime<Utc>) {
        let entering_terminal =
            status.is_terminal() && (!self.status.is_terminal() || self.stopped_at.is_none());
        self.status = status;
        if entering_terminal {
            self.stopped_at = Some(now);
            self.duration = Some((now - self.started_at).num_milliseconds());
        }
    }
}
