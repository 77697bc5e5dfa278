use thiserror::Error;

/// Error taxonomy of the session engine.
///
/// Only `InvalidArgument` is ever surfaced to the caller (at construction).
/// The other variants exist so diagnostics carry a stable classification;
/// the engine degrades in place instead of propagating them (wrong answers
/// and end-of-session are plain state transitions, never errors).
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("inconsistent state: {0}")]
    InconsistentState(&'static str),

    #[error("persistence failure: {0:#}")]
    Persistence(anyhow::Error),
}
