//! Metric events
//!
//! A metric series is every event sharing `(type, name)`, ordered by
//! timestamp. Events are appended and never mutated.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Report category of a metric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// Workflow execution durations, named by workflow id
    Execution,
    /// HTTP response times, named `METHOD:/path`
    Api,
    /// Process memory samples
    Memory,
    /// Cache accesses, named `hit` / `miss` (optionally `namespace:hit`)
    Cache,
}

impl MetricType {
    /// Every category, in report order
    pub const ALL: [Self; 4] = [Self::Execution, Self::Api, Self::Memory, Self::Cache];

    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Execution => "execution",
            Self::Api => "api",
            Self::Memory => "memory",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "execution" => Ok(Self::Execution),
            "api" => Ok(Self::Api),
            "memory" => Ok(Self::Memory),
            "cache" => Ok(Self::Cache),
            other => Err(Error::invalid_argument(format!("Unknown metric type: {other}"))),
        }
    }
}

/// One point of a metric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEvent {
    /// Report category
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// Series name within the category
    pub name: String,
    /// Measured value (milliseconds, bytes or a count)
    pub value: f64,
    /// When the value was measured
    pub timestamp: DateTime<Utc>,
    /// Free-form context (status code, node count, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl MetricEvent {
    /// Create an event without metadata
    pub fn new<N: Into<String>>(
        metric_type: MetricType,
        name: N,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            metric_type,
            name: name.into(),
            value,
            timestamp,
            metadata: None,
        }
    }

    /// Attach metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
