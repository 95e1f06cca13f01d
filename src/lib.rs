pub mod error;
pub mod trace;

pub use error::TraceError;
pub use trace::{
    NodeStatus, SharedTraceStore, StepStatus, TraceContext, TraceRecord, TraceStats, TraceStore,
    TraceSummary,
};
