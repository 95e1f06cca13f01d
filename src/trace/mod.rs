pub mod context;
pub mod record;
pub mod shared;
pub mod state;
pub mod stats;
pub mod store;

pub use context::TraceContext;
pub use record::{StepStatus, TraceRecord};
pub use shared::SharedTraceStore;
pub use state::{NodeState, NodeStatus, TraceState};
pub use stats::{TraceStats, TraceSummary};
pub use store::TraceStore;
