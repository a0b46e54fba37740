//! Read-only query surface consumed by outer API layers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use legitimacy_store::{LegitimacyStore, QueryWindow, StoreResult, TransitionRecord};
use legitimacy_types::{AcknowledgmentId, Band, LegitimacyState, RestorationAcknowledgment};

/// Facade over the state port for read paths. Holds no state of its own.
pub struct LegitimacyQueryService {
    store: Arc<dyn LegitimacyStore>,
}

impl LegitimacyQueryService {
    pub fn new(store: Arc<dyn LegitimacyStore>) -> Self {
        Self { store }
    }

    pub async fn current_band(&self) -> StoreResult<Band> {
        self.store.current_band().await
    }

    pub async fn state(&self) -> StoreResult<LegitimacyState> {
        Ok(self.store.legitimacy_state().await?.state)
    }

    /// Transition history, oldest-first, optionally filtered and limited.
    pub async fn transition_history(
        &self,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<TransitionRecord>> {
        self.store.transition_history(since, limit).await
    }

    /// Point-in-time reconstruction of the state as of `at`.
    pub async fn state_at(&self, at: DateTime<Utc>) -> StoreResult<Option<LegitimacyState>> {
        self.store.state_at(at).await
    }

    pub async fn violation_count(&self) -> StoreResult<u64> {
        self.store.violation_count().await
    }

    pub async fn acknowledgment(
        &self,
        id: &AcknowledgmentId,
    ) -> StoreResult<Option<RestorationAcknowledgment>> {
        self.store.acknowledgment(id).await
    }

    pub async fn acknowledgment_history(
        &self,
        window: QueryWindow,
    ) -> StoreResult<Vec<RestorationAcknowledgment>> {
        self.store.acknowledgment_history(window).await
    }

    pub async fn acknowledgment_count(&self) -> StoreResult<u64> {
        self.store.acknowledgment_count().await
    }
}
