use async_trait::async_trait;
use chrono::{DateTime, Utc};
use legitimacy_types::{
    AcknowledgmentId, Band, LegitimacyState, RestorationAcknowledgment, Transition,
};

use crate::model::{QueryWindow, TransitionRecord, VersionedState};
use crate::StoreResult;

/// Storage interface for the legitimacy snapshot and transition history.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// One-time setup. Fails with `AlreadyInitialized` if state exists.
    async fn initialize_state(
        &self,
        initial_band: Band,
        at: DateTime<Utc>,
    ) -> StoreResult<LegitimacyState>;

    /// The band of the current snapshot.
    async fn current_band(&self) -> StoreResult<Band>;

    /// The current snapshot together with its version.
    async fn legitimacy_state(&self) -> StoreResult<VersionedState>;

    /// Atomically append `transition` to the history and replace the
    /// snapshot to reflect it. Both happen or neither.
    ///
    /// `expected_version` must match the version the caller read; a
    /// mismatch fails with `VersionConflict` and the caller re-reads and
    /// recomputes. This is the serialization point that prevents two
    /// concurrent writers from both committing against the same snapshot.
    async fn record_transition(
        &self,
        expected_version: u64,
        transition: Transition,
    ) -> StoreResult<LegitimacyState>;

    /// History entries ordered oldest-first, optionally filtered to
    /// timestamps at or after `since` and truncated to `limit`.
    async fn transition_history(
        &self,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<TransitionRecord>>;

    /// Reconstruct the state as of `at` from the history. `None` when `at`
    /// precedes initialization.
    async fn state_at(&self, at: DateTime<Utc>) -> StoreResult<Option<LegitimacyState>>;

    /// Lifetime violation count of the current snapshot.
    async fn violation_count(&self) -> StoreResult<u64>;
}

/// Storage interface for the append-only restoration acknowledgment ledger.
#[async_trait]
pub trait AcknowledgmentStore: Send + Sync {
    /// Append an acknowledgment. Ids are unique; a duplicate is a conflict.
    async fn append_acknowledgment(
        &self,
        acknowledgment: RestorationAcknowledgment,
    ) -> StoreResult<()>;

    /// Look up one acknowledgment by id.
    async fn acknowledgment(
        &self,
        id: &AcknowledgmentId,
    ) -> StoreResult<Option<RestorationAcknowledgment>>;

    /// Acknowledgments in append order.
    async fn acknowledgment_history(
        &self,
        window: QueryWindow,
    ) -> StoreResult<Vec<RestorationAcknowledgment>>;

    /// Number of acknowledgments ever recorded.
    async fn acknowledgment_count(&self) -> StoreResult<u64>;
}

/// Unified state port used by the orchestrators.
pub trait LegitimacyStore: StateStore + AcknowledgmentStore + Send + Sync {}

impl<T> LegitimacyStore for T where T: StateStore + AcknowledgmentStore + Send + Sync {}
