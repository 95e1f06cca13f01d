//! Thread-safe handle over a trace store

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::TraceError;
use crate::trace::context::TraceContext;
use crate::trace::record::{StepStatus, TraceRecord};
use crate::trace::stats::TraceStats;
use crate::trace::store::TraceStore;

/// Clonable handle sharing one [`TraceStore`] across threads.
///
/// Each call holds the lock for its full duration, so per-call atomicity and
/// the single-writer step discipline carry over unchanged: two threads racing
/// the same context still leave exactly one of them with `OutOfSequence`.
#[derive(Clone, Default)]
pub struct SharedTraceStore {
    inner: Arc<Mutex<TraceStore>>,
}

impl SharedTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a closure with exclusive access to the underlying store
    pub fn with_store<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut TraceStore) -> T,
    {
        f(&mut self.inner.lock())
    }

    pub fn create_env(
        &self,
        payload: Value,
        source: Option<&str>,
    ) -> Result<TraceContext, TraceError> {
        self.inner.lock().create_env(payload, source)
    }

    pub fn record_step(
        &self,
        ctx: &TraceContext,
        node: &str,
        status: StepStatus,
        meta: Option<Value>,
    ) -> Result<TraceContext, TraceError> {
        self.inner.lock().record_step(ctx, node, status, meta)
    }

    pub fn replay(&self, trace_id: &str) -> Result<Vec<TraceRecord>, TraceError> {
        self.inner.lock().replay(trace_id)
    }

    pub fn all_records(&self) -> Vec<TraceRecord> {
        self.inner.lock().all_records()
    }

    pub fn active_traces(&self) -> Vec<String> {
        self.inner.lock().active_traces()
    }

    pub fn stats(&self) -> TraceStats {
        self.inner.lock().stats()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

impl std::fmt::Debug for SharedTraceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTraceStore").finish_non_exhaustive()
    }
}
