//! Error taxonomy for trace recording and replay

use thiserror::Error;

/// Failure kinds surfaced by store operations.
///
/// Every variant is a caller-input or protocol violation; none are transient.
/// A failed call never mutates the store, so retrying with corrected input is
/// always safe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("environment payload must be a non-null object")]
    InvalidPayload,
    #[error("context must carry a trace id and an environment id")]
    InvalidContext,
    #[error("no trace with id {0}")]
    UnknownTrace(String),
    #[error("context environment id {found} does not match stored {expected}")]
    EnvMismatch { expected: String, found: String },
    #[error("context step counter is malformed")]
    InvalidStepId,
    #[error("context step counter {found} does not match trace position {expected}")]
    OutOfSequence { expected: u64, found: u64 },
    #[error("trace {0} was terminated by a critical error")]
    TraceTerminated(String),
    #[error("node {0} is already entered")]
    DoubleEnter(String),
    #[error("node {0} cannot exit before entering")]
    ExitWithoutEnter(String),
    #[error("node {0} cannot report an error before entering")]
    ErrorWithoutEnter(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
