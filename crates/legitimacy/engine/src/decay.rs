//! Decay orchestration: objective, unconditional downward movement.

use std::sync::Arc;

use legitimacy_policy::{calculate_target_band, validate_transition, SeverityPolicy, ViolationSeverity};
use legitimacy_store::{LegitimacyStore, StoreError};
use legitimacy_types::{
    events, BandDecreased, LegitimacyState, Transition, TransitionKind, SYSTEM_ACTOR,
};
use tracing::{debug, info, warn};

use crate::error::{DecayError, EmitError};
use crate::ports::{EventEmitter, TimeAuthority};

/// Attempts before contention is surfaced to the caller for retry.
const MAX_COMMIT_ATTEMPTS: u32 = 8;

/// Result of processing one violation event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecayOutcome {
    pub transition_occurred: bool,
    pub new_state: LegitimacyState,
    pub severity: ViolationSeverity,
    pub bands_dropped: u8,
}

/// Consumes violation events and drives the band downward.
///
/// Decay never consults authorization and never fails for policy reasons.
/// The only no-op outcomes are terminal-state absorption and a computed
/// target equal to the current band.
pub struct DecayService {
    store: Arc<dyn LegitimacyStore>,
    emitter: Arc<dyn EventEmitter>,
    clock: Arc<dyn TimeAuthority>,
    policy: SeverityPolicy,
}

impl DecayService {
    pub fn new(
        store: Arc<dyn LegitimacyStore>,
        emitter: Arc<dyn EventEmitter>,
        clock: Arc<dyn TimeAuthority>,
        policy: SeverityPolicy,
    ) -> Self {
        Self {
            store,
            emitter,
            clock,
            policy,
        }
    }

    /// Process one violation event: classify, compute the target band, and
    /// commit the transition atomically against the snapshot version.
    ///
    /// On a version conflict the state is re-read and the whole computation
    /// repeats, so a violation racing another writer decays from the band
    /// that writer left behind rather than from a stale read. Exhausted
    /// retries return [`DecayError::Contention`]; the violation is then not
    /// processed and the caller must retry it.
    pub async fn process_violation(
        &self,
        violation_event_id: &str,
        violation_type: &str,
    ) -> Result<DecayOutcome, DecayError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let versioned = self.store.legitimacy_state().await?;
            let current = versioned.state.current_band;
            let classified = self.policy.classify(violation_type);

            if current.is_terminal() {
                // No deeper state exists: FAILED absorbs further violations.
                debug!(violation_event_id, violation_type, "violation absorbed at terminal band");
                return Ok(DecayOutcome {
                    transition_occurred: false,
                    new_state: versioned.state,
                    severity: classified.severity,
                    bands_dropped: 0,
                });
            }

            let target = calculate_target_band(current, classified.severity);
            if target == current {
                debug!(
                    violation_event_id,
                    violation_type,
                    band = %current,
                    "violation produced no band change"
                );
                return Ok(DecayOutcome {
                    transition_occurred: false,
                    new_state: versioned.state,
                    severity: classified.severity,
                    bands_dropped: 0,
                });
            }

            validate_transition(current, target, TransitionKind::Automatic)
                .expect("computed decay target must be structurally legal");

            let transition = Transition::automatic(
                current,
                target,
                violation_event_id,
                format!("Violation: {violation_type}"),
                self.clock.now(),
            );
            let transitioned_at = transition.timestamp;

            match self
                .store
                .record_transition(versioned.version, transition)
                .await
            {
                Ok(new_state) => {
                    info!(
                        from = %current,
                        to = %target,
                        severity = %classified.severity,
                        violation_type,
                        violation_event_id,
                        "legitimacy band decreased"
                    );
                    let payload = BandDecreased {
                        from_band: current,
                        to_band: target,
                        severity: classified.severity.to_string(),
                        violation_type: violation_type.to_string(),
                        violation_event_id: violation_event_id.to_string(),
                        violation_count: new_state.violation_count,
                        transitioned_at,
                    };
                    let payload = serde_json::to_value(&payload)
                        .map_err(|e| EmitError::Serialization(e.to_string()))?;
                    self.emitter
                        .emit(events::BAND_DECREASED, SYSTEM_ACTOR, payload)
                        .await?;
                    return Ok(DecayOutcome {
                        transition_occurred: true,
                        new_state,
                        severity: classified.severity,
                        bands_dropped: target.severity() - current.severity(),
                    });
                }
                Err(StoreError::VersionConflict { expected, actual }) => {
                    warn!(
                        violation_event_id,
                        attempt, expected, actual, "snapshot moved underneath violation, recomputing"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(DecayError::Contention {
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }
}
