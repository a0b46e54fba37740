//! Orchestrator error types.

use legitimacy_store::StoreError;
use legitimacy_types::{AcknowledgmentId, Band};
use thiserror::Error;

/// Errors from the event emission boundary. Emission is at-least-once and
/// failures propagate; they are never swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("event payload serialization failed: {0}")]
    Serialization(String),

    #[error("event emission failed: {0}")]
    Failed(String),
}

/// Errors from violation processing.
///
/// Decay has no policy failures: the only error sources are the store, the
/// emitter, and exhausted contention retries. A violation that returns an
/// error has not been processed and must be retried by the caller.
#[derive(Debug, Error)]
pub enum DecayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("transition contended {attempts} times without committing, retry the violation")]
    Contention { attempts: u32 },
}

/// Errors from restoration requests. Each validation failure is distinct
/// and returned, never merged into a generic error.
#[derive(Debug, Error)]
pub enum RestorationError {
    #[error("operator is not authorized to restore the legitimacy band")]
    NotAuthorized,

    #[error("FAILED is terminal, reconstitution required")]
    Terminal,

    #[error("restoration from {current} to {requested} is not an upward transition")]
    NotUpward { current: Band, requested: Band },

    #[error("restoration must be one step at a time: from {current} only {allowed} is reachable")]
    NotOneStep { current: Band, allowed: Band },

    #[error("restoration requires a non-empty reason")]
    BlankReason,

    #[error("restoration requires non-empty evidence")]
    BlankEvidence,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    /// The acknowledgment committed but its paired transition did not.
    /// The ledger and the snapshot are divergent; this is fatal and must
    /// be surfaced to operators, never retried silently.
    #[error("acknowledgment {acknowledgment_id} recorded but its transition failed: {source}")]
    AcknowledgmentOrphaned {
        acknowledgment_id: AcknowledgmentId,
        source: StoreError,
    },
}
