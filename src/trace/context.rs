//! Caller-held proof-of-position token

use serde::{Deserialize, Serialize};

/// Immutable capability token threaded between step calls.
///
/// A context is a snapshot, not a live handle: the store re-validates every
/// field on each call, so mutating a copy never affects admission state. A
/// tampered or stale context is simply rejected on its next use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Identifies the trace this context belongs to
    pub trace_id: String,
    /// Identifies the environment the trace was created under
    pub env_id: String,
    /// Count of steps admitted so far for this trace.
    ///
    /// Doubles as a fencing token: a step is only admitted when its context
    /// carries the exact current count, so a forked or reused context
    /// surfaces as out-of-sequence instead of silently reordering the log.
    pub step_id: u64,
}

impl TraceContext {
    pub fn new(trace_id: impl Into<String>, env_id: impl Into<String>, step_id: u64) -> Self {
        Self {
            trace_id: trace_id.into(),
            env_id: env_id.into(),
            step_id,
        }
    }

    /// Successor context after one admitted step
    pub(crate) fn advance(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            env_id: self.env_id.clone(),
            step_id: self.step_id + 1,
        }
    }
}
