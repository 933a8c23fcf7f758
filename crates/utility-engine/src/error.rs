//! Error types surfaced by the engine.

use thiserror::Error;

/// Errors raised by [`DecisionEngine`](crate::DecisionEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `best_decision` was called while no candidate is loaded.
    #[error("empty active rule set")]
    EmptyActiveSet,

    /// Every evaluated candidate scored exactly zero. The host may fall
    /// back to a default idle behavior.
    #[error("no rule was activated")]
    NoDecisionActivated,

    /// A decision was registered without any considerations, which would
    /// make its score undefined.
    #[error("decision '{0}' has no considerations")]
    NoConsiderations(String),
}

/// Errors raised while constructing a [`Spline`](crate::Spline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplineError {
    /// A curve needs at least two control points.
    #[error("spline needs at least two control points, got {0}")]
    TooFewPoints(usize),
}
