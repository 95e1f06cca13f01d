//! Read-only aggregation over the store

use serde::{Deserialize, Serialize};

/// Summary of one active trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceSummary {
    pub trace_id: String,
    pub env_id: String,
    /// Steps admitted so far
    pub step_count: u64,
    /// Distinct nodes that have taken at least one step
    pub node_count: usize,
    pub has_critical_error: bool,
}

/// Snapshot of store-wide counters plus per-trace summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceStats {
    /// Records in the log, environment records included
    pub total_records: usize,
    /// Traces currently in the state table
    pub active_traces: usize,
    pub traces: Vec<TraceSummary>,
}
