//! In-memory record log and trace state table
//!
//! The store is the single writer for both the append-only record log and the
//! per-trace state table. Step admission runs a fail-fast guard pipeline; a
//! rejected step never mutates state or appends to the log.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::error::TraceError;
use crate::trace::context::TraceContext;
use crate::trace::record::{StepStatus, TraceRecord};
use crate::trace::state::TraceState;
use crate::trace::stats::{TraceStats, TraceSummary};

/// Source label recorded when the caller does not provide one
pub const DEFAULT_SOURCE: &str = "unknown";

/// Record log plus trace state table, owned by the host application.
///
/// All mutation goes through `&mut self`, so exclusive access is enforced at
/// the type level. Hosts that share one store across threads wrap it in
/// [`SharedTraceStore`](crate::SharedTraceStore) instead.
#[derive(Debug, Default)]
pub struct TraceStore {
    records: Vec<TraceRecord>,
    traces: HashMap<String, TraceState>,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new trace: append its environment record, seed its state, and
    /// return the step-zero context the caller threads into `record_step`.
    ///
    /// `payload` must be a JSON object; null, primitives, and arrays fail
    /// `InvalidPayload`. `source` defaults to [`DEFAULT_SOURCE`] and is not
    /// validated. Validation runs before any mutation, so a failed call
    /// leaves no partial state.
    pub fn create_env(
        &mut self,
        payload: Value,
        source: Option<&str>,
    ) -> Result<TraceContext, TraceError> {
        if !payload.is_object() {
            return Err(TraceError::InvalidPayload);
        }

        let trace_id = format!("trace-{}", Uuid::new_v4().as_simple());
        let env_id = format!("env-{}", Uuid::new_v4().as_simple());
        let source = source.unwrap_or(DEFAULT_SOURCE).to_string();

        self.records.push(TraceRecord::Env {
            trace_id: trace_id.clone(),
            env_id: env_id.clone(),
            timestamp: Utc::now(),
            source,
            payload,
        });
        self.traces
            .insert(trace_id.clone(), TraceState::new(env_id.clone()));

        tracing::debug!(trace_id = %trace_id, env_id = %env_id, "created trace environment");

        Ok(TraceContext {
            trace_id,
            env_id,
            step_id: 0,
        })
    }

    /// Validate and admit one step, returning the successor context.
    ///
    /// Guards run fail-fast in a fixed order: context shape, trace existence,
    /// environment identity, step sequencing, the trace-wide terminal-error
    /// lock, and finally the per-node state machine. The context's `step_id`
    /// is a fencing token: it must equal the trace's current count, so a
    /// stale or forked context fails `OutOfSequence` instead of reordering or
    /// double-appending steps.
    ///
    /// An admitted `Error` step is a successful call that permanently closes
    /// the trace: every later step on it fails `TraceTerminated`.
    pub fn record_step(
        &mut self,
        ctx: &TraceContext,
        node: &str,
        status: StepStatus,
        meta: Option<Value>,
    ) -> Result<TraceContext, TraceError> {
        if ctx.trace_id.is_empty() || ctx.env_id.is_empty() {
            return Err(TraceError::InvalidContext);
        }

        let state = self
            .traces
            .get_mut(&ctx.trace_id)
            .ok_or_else(|| TraceError::UnknownTrace(ctx.trace_id.clone()))?;

        if ctx.env_id != state.env_id {
            return Err(TraceError::EnvMismatch {
                expected: state.env_id.clone(),
                found: ctx.env_id.clone(),
            });
        }

        if ctx.step_id != state.last_step_id {
            return Err(TraceError::OutOfSequence {
                expected: state.last_step_id,
                found: ctx.step_id,
            });
        }

        if state.has_critical_error {
            return Err(TraceError::TraceTerminated(ctx.trace_id.clone()));
        }

        // Read the node without materializing it: a rejected transition must
        // not leave a fresh idle entry behind.
        let current = state
            .nodes
            .get(node)
            .map(|n| n.status)
            .unwrap_or_default();
        let next = current.apply(node, status)?;

        let step_id = state.last_step_id + 1;
        let node_state = state.nodes.entry(node.to_string()).or_default();
        node_state.status = next;
        node_state.last_step_id = Some(step_id);
        state.last_step_id = step_id;
        if status == StepStatus::Error {
            state.has_critical_error = true;
            tracing::debug!(trace_id = %ctx.trace_id, node, "trace terminated by node error");
        }

        self.records.push(TraceRecord::Step {
            trace_id: ctx.trace_id.clone(),
            env_id: ctx.env_id.clone(),
            step_id,
            timestamp: Utc::now(),
            node: node.to_string(),
            status,
            meta,
        });

        tracing::trace!(
            trace_id = %ctx.trace_id,
            step_id,
            node,
            status = status.as_str(),
            "step admitted"
        );

        Ok(ctx.advance())
    }

    /// Every record for `trace_id`: the environment record first, then steps
    /// in strictly increasing `step_id` order.
    ///
    /// Reads only the log, never the state table, so records survive for a
    /// trace the table no longer knows. Unknown traces yield an empty vec.
    pub fn replay(&self, trace_id: &str) -> Result<Vec<TraceRecord>, TraceError> {
        if trace_id.is_empty() {
            return Err(TraceError::InvalidArgument(
                "trace id must be a non-empty string".to_string(),
            ));
        }

        let mut records: Vec<TraceRecord> = self
            .records
            .iter()
            .filter(|record| record.trace_id() == trace_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.step_id());
        Ok(records)
    }

    /// Snapshot copy of the whole log
    pub fn all_records(&self) -> Vec<TraceRecord> {
        self.records.clone()
    }

    /// Ids of traces currently in the state table
    pub fn active_traces(&self) -> Vec<String> {
        self.traces.keys().cloned().collect()
    }

    /// Store-wide counters plus one summary per active trace, sorted by
    /// trace id for stable output.
    pub fn stats(&self) -> TraceStats {
        let mut traces: Vec<TraceSummary> = self
            .traces
            .iter()
            .map(|(trace_id, state)| TraceSummary {
                trace_id: trace_id.clone(),
                env_id: state.env_id.clone(),
                step_count: state.last_step_id,
                node_count: state.nodes.len(),
                has_critical_error: state.has_critical_error,
            })
            .collect();
        traces.sort_by(|a, b| a.trace_id.cmp(&b.trace_id));

        TraceStats {
            total_records: self.records.len(),
            active_traces: self.traces.len(),
            traces,
        }
    }

    /// Drop all trace state and empty the log. Test isolation; there is no
    /// per-trace clear.
    pub fn clear(&mut self) {
        tracing::debug!(
            records = self.records.len(),
            traces = self.traces.len(),
            "clearing all traces"
        );
        self.records.clear();
        self.traces.clear();
    }
}
