//! Append-only record types for the trace log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status a caller reports for a node step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Enter,
    Exit,
    Error,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Enter => "enter",
            StepStatus::Exit => "exit",
            StepStatus::Error => "error",
        }
    }
}

/// One entry in the append-only record log.
///
/// A trace owns exactly one `Env` record (written at creation) and zero or
/// more `Step` records whose `step_id` values form a dense sequence from 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceRecord {
    Env {
        trace_id: String,
        env_id: String,
        timestamp: DateTime<Utc>,
        source: String,
        payload: Value,
    },
    Step {
        trace_id: String,
        env_id: String,
        step_id: u64,
        timestamp: DateTime<Utc>,
        node: String,
        status: StepStatus,
        meta: Option<Value>,
    },
}

impl TraceRecord {
    pub fn trace_id(&self) -> &str {
        match self {
            TraceRecord::Env { trace_id, .. } | TraceRecord::Step { trace_id, .. } => trace_id,
        }
    }

    /// Step counter for `Step` records; `None` for the environment record
    pub fn step_id(&self) -> Option<u64> {
        match self {
            TraceRecord::Env { .. } => None,
            TraceRecord::Step { step_id, .. } => Some(*step_id),
        }
    }
}
