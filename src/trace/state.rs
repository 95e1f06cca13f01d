//! Per-trace mutable state and the per-node state machine

use std::collections::HashMap;

use crate::error::TraceError;
use crate::trace::record::StepStatus;

/// Lifecycle position of a single named node within a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStatus {
    #[default]
    Idle,
    Entered,
    Exited,
    Errored,
}

impl NodeStatus {
    /// Status after applying `status` to a node, or the guard failure that
    /// rejects the transition.
    ///
    /// Valid transitions: `Idle -enter-> Entered -exit-> Exited`,
    /// `Exited -enter-> Entered` (loops/retries), and
    /// `Entered -error-> Errored`, which is terminal for the whole trace.
    pub fn apply(self, node: &str, status: StepStatus) -> Result<NodeStatus, TraceError> {
        match (self, status) {
            (NodeStatus::Entered, StepStatus::Enter) => {
                Err(TraceError::DoubleEnter(node.to_string()))
            }
            (_, StepStatus::Enter) => Ok(NodeStatus::Entered),
            (NodeStatus::Entered, StepStatus::Exit) => Ok(NodeStatus::Exited),
            (_, StepStatus::Exit) => Err(TraceError::ExitWithoutEnter(node.to_string())),
            (NodeStatus::Entered, StepStatus::Error) => Ok(NodeStatus::Errored),
            (_, StepStatus::Error) => Err(TraceError::ErrorWithoutEnter(node.to_string())),
        }
    }
}

/// Per-node bookkeeping inside a trace
#[derive(Debug, Clone, Default)]
pub struct NodeState {
    pub status: NodeStatus,
    /// Step that last touched this node, if any
    pub last_step_id: Option<u64>,
}

/// Mutable server-side state for one trace.
///
/// Created by environment creation, mutated only by step admission, and
/// destroyed only by a global clear. Node entries are materialized lazily on
/// the first admitted step that names them.
#[derive(Debug, Clone)]
pub struct TraceState {
    pub env_id: String,
    /// Count of steps admitted so far; the next admitted step takes id + 1
    pub last_step_id: u64,
    /// Once set, the trace is permanently closed to new steps
    pub has_critical_error: bool,
    pub nodes: HashMap<String, NodeState>,
}

impl TraceState {
    pub fn new(env_id: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            last_step_id: 0,
            has_critical_error: false,
            nodes: HashMap::new(),
        }
    }
}
