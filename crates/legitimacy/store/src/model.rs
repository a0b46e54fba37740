//! Stored record shapes.

use legitimacy_types::{LegitimacyState, Transition};
use serde::{Deserialize, Serialize};

use crate::{StoreError, StoreResult};

/// Generic query window for paged reads. A `limit` of 0 means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryWindow {
    pub limit: usize,
    pub offset: usize,
}

/// The current snapshot together with its optimistic-concurrency version.
///
/// The version counts committed transitions; `record_transition` only
/// succeeds against the version the caller read, so two writers racing from
/// the same snapshot cannot both commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedState {
    pub version: u64,
    pub state: LegitimacyState,
}

/// One committed history entry, hash-linked to its predecessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,
    pub hash: String,
    pub transition: Transition,
}

/// Canonical hash of a history entry, chained over its predecessor.
pub fn compute_record_hash(
    transition: &Transition,
    previous_hash: Option<&str>,
    sequence: u64,
) -> StoreResult<String> {
    let serializable = serde_json::json!({
        "previous_hash": previous_hash,
        "sequence": sequence,
        "transition": transition,
    });
    let serialized = serde_json::to_vec(&serializable)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(blake3::hash(&serialized).to_hex().to_string())
}

/// Verify a history slice is an unbroken, untampered chain.
///
/// `records` must be ordered oldest-first starting at sequence 1.
pub fn verify_chain(records: &[TransitionRecord]) -> StoreResult<()> {
    let mut previous_hash: Option<&str> = None;
    for (index, record) in records.iter().enumerate() {
        let expected_sequence = index as u64 + 1;
        if record.sequence != expected_sequence {
            return Err(StoreError::IntegrityViolation {
                sequence: record.sequence,
                reason: format!("expected sequence {expected_sequence}"),
            });
        }
        if record.previous_hash.as_deref() != previous_hash {
            return Err(StoreError::IntegrityViolation {
                sequence: record.sequence,
                reason: "previous-hash link broken".to_string(),
            });
        }
        let recomputed =
            compute_record_hash(&record.transition, previous_hash, record.sequence)?;
        if recomputed != record.hash {
            return Err(StoreError::IntegrityViolation {
                sequence: record.sequence,
                reason: "record hash does not match contents".to_string(),
            });
        }
        previous_hash = Some(record.hash.as_str());
    }
    Ok(())
}

pub(crate) fn apply_window<T>(items: Vec<T>, window: QueryWindow) -> Vec<T> {
    let iter = items.into_iter().skip(window.offset);
    if window.limit == 0 {
        iter.collect()
    } else {
        iter.take(window.limit).collect()
    }
}
