//! In-memory reference implementation of the state port.
//!
//! This adapter is deterministic and test-friendly. Production deployments
//! should use a transactional append-only backend (sequence-numbered table
//! or write-ahead log) for source-of-truth data.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use legitimacy_types::{
    AcknowledgmentId, Band, LegitimacyState, RestorationAcknowledgment, Transition,
};

use crate::model::{apply_window, compute_record_hash, QueryWindow, TransitionRecord, VersionedState};
use crate::traits::{AcknowledgmentStore, StateStore};
use crate::{StoreError, StoreResult};

/// Snapshot and history share one cell so `record_transition` mutates both
/// under a single write guard.
struct StateCell {
    initial: LegitimacyState,
    versioned: VersionedState,
    records: Vec<TransitionRecord>,
}

/// In-memory legitimacy store adapter.
#[derive(Default)]
pub struct InMemoryLegitimacyStore {
    cell: RwLock<Option<StateCell>>,
    acknowledgments: RwLock<Vec<RestorationAcknowledgment>>,
}

impl InMemoryLegitimacyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryLegitimacyStore {
    async fn initialize_state(
        &self,
        initial_band: Band,
        at: DateTime<Utc>,
    ) -> StoreResult<LegitimacyState> {
        let mut guard = self
            .cell
            .write()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;

        if guard.is_some() {
            return Err(StoreError::AlreadyInitialized);
        }

        let state = LegitimacyState::initial(initial_band, at);
        *guard = Some(StateCell {
            initial: state.clone(),
            versioned: VersionedState {
                version: 0,
                state: state.clone(),
            },
            records: Vec::new(),
        });
        Ok(state)
    }

    async fn current_band(&self) -> StoreResult<Band> {
        let guard = self
            .cell
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(cell.versioned.state.current_band)
    }

    async fn legitimacy_state(&self) -> StoreResult<VersionedState> {
        let guard = self
            .cell
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(cell.versioned.clone())
    }

    async fn record_transition(
        &self,
        expected_version: u64,
        transition: Transition,
    ) -> StoreResult<LegitimacyState> {
        let mut guard = self
            .cell
            .write()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_mut().ok_or(StoreError::NotInitialized)?;

        if cell.versioned.version != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: cell.versioned.version,
            });
        }

        if transition.from_band != cell.versioned.state.current_band {
            return Err(StoreError::InvariantViolation(format!(
                "transition from {} does not match current band {}",
                transition.from_band, cell.versioned.state.current_band
            )));
        }

        let sequence = cell.records.len() as u64 + 1;
        let previous_hash = cell.records.last().map(|r| r.hash.clone());
        let hash = compute_record_hash(&transition, previous_hash.as_deref(), sequence)?;

        let next_state = cell.versioned.state.apply(&transition);
        cell.records.push(TransitionRecord {
            sequence,
            previous_hash,
            hash,
            transition,
        });
        cell.versioned = VersionedState {
            version: expected_version + 1,
            state: next_state.clone(),
        };
        Ok(next_state)
    }

    async fn transition_history(
        &self,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<TransitionRecord>> {
        let guard = self
            .cell
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_ref().ok_or(StoreError::NotInitialized)?;

        let mut records = cell
            .records
            .iter()
            .filter(|record| since.map_or(true, |cutoff| record.transition.timestamp >= cutoff))
            .cloned()
            .collect::<Vec<_>>();
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    async fn state_at(&self, at: DateTime<Utc>) -> StoreResult<Option<LegitimacyState>> {
        let guard = self
            .cell
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_ref().ok_or(StoreError::NotInitialized)?;

        if at < cell.initial.entered_at {
            return Ok(None);
        }

        let mut state = cell.initial.clone();
        for record in &cell.records {
            if record.transition.timestamp > at {
                break;
            }
            state = state.apply(&record.transition);
        }
        Ok(Some(state))
    }

    async fn violation_count(&self) -> StoreResult<u64> {
        let guard = self
            .cell
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))?;
        let cell = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(cell.versioned.state.violation_count)
    }
}

#[async_trait]
impl AcknowledgmentStore for InMemoryLegitimacyStore {
    async fn append_acknowledgment(
        &self,
        acknowledgment: RestorationAcknowledgment,
    ) -> StoreResult<()> {
        let mut guard = self
            .acknowledgments
            .write()
            .map_err(|_| StoreError::Backend("acknowledgment lock poisoned".to_string()))?;

        if guard.iter().any(|a| a.id == acknowledgment.id) {
            return Err(StoreError::Conflict(format!(
                "acknowledgment {} already recorded",
                acknowledgment.id
            )));
        }
        guard.push(acknowledgment);
        Ok(())
    }

    async fn acknowledgment(
        &self,
        id: &AcknowledgmentId,
    ) -> StoreResult<Option<RestorationAcknowledgment>> {
        let guard = self
            .acknowledgments
            .read()
            .map_err(|_| StoreError::Backend("acknowledgment lock poisoned".to_string()))?;
        Ok(guard.iter().find(|a| &a.id == id).cloned())
    }

    async fn acknowledgment_history(
        &self,
        window: QueryWindow,
    ) -> StoreResult<Vec<RestorationAcknowledgment>> {
        let guard = self
            .acknowledgments
            .read()
            .map_err(|_| StoreError::Backend("acknowledgment lock poisoned".to_string()))?;
        Ok(apply_window(guard.clone(), window))
    }

    async fn acknowledgment_count(&self) -> StoreResult<u64> {
        let guard = self
            .acknowledgments
            .read()
            .map_err(|_| StoreError::Backend("acknowledgment lock poisoned".to_string()))?;
        Ok(guard.len() as u64)
    }
}
