//! Restoration orchestration: deliberate, acknowledged, one-step recovery.

use std::sync::Arc;

use legitimacy_store::LegitimacyStore;
use legitimacy_types::{
    events, Band, BandIncreased, LegitimacyState, OperatorId, RestorationAcknowledged,
    RestorationAcknowledgment, Transition, UnauthorizedRestorationAttempt,
};
use tracing::{error, info, warn};

use crate::error::{EmitError, RestorationError};
use crate::ports::{EventEmitter, PermissionPort, TimeAuthority, RESTORE_ACTION};

/// A granted restoration: the new snapshot and the acknowledgment that
/// authorized it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestorationGrant {
    pub state: LegitimacyState,
    pub acknowledgment: RestorationAcknowledgment,
}

/// Consumes operator restoration requests and drives the band upward, one
/// acknowledged step at a time.
pub struct RestorationService {
    permissions: Arc<dyn PermissionPort>,
    store: Arc<dyn LegitimacyStore>,
    emitter: Arc<dyn EventEmitter>,
    clock: Arc<dyn TimeAuthority>,
}

impl RestorationService {
    pub fn new(
        permissions: Arc<dyn PermissionPort>,
        store: Arc<dyn LegitimacyStore>,
        emitter: Arc<dyn EventEmitter>,
        clock: Arc<dyn TimeAuthority>,
    ) -> Self {
        Self {
            permissions,
            store,
            emitter,
            clock,
        }
    }

    /// Request a restoration to `target_band`.
    ///
    /// Checks short-circuit in order: authorization, terminal state,
    /// direction, step size, reason/evidence. Each failure mode is a
    /// distinct [`RestorationError`] variant returned to the caller.
    ///
    /// The acknowledgment is written to its ledger before the transition
    /// touches the snapshot; a transition failure after that point is
    /// surfaced as the fatal [`RestorationError::AcknowledgmentOrphaned`].
    pub async fn request_restoration(
        &self,
        operator_id: &OperatorId,
        target_band: Band,
        reason: &str,
        evidence: &str,
    ) -> Result<RestorationGrant, RestorationError> {
        if !self
            .permissions
            .has_permission(operator_id, RESTORE_ACTION)
            .await
        {
            // The caller sees a generic denial; the audit trail sees the
            // full actor detail.
            warn!(operator = %operator_id, requested = %target_band, "unauthorized restoration attempt");
            let payload = UnauthorizedRestorationAttempt {
                operator_id: operator_id.clone(),
                requested_band: target_band,
                attempted_at: self.clock.now(),
            };
            self.emitter
                .emit(
                    events::UNAUTHORIZED_RESTORATION_ATTEMPT,
                    &operator_id.0,
                    to_payload(&payload)?,
                )
                .await?;
            return Err(RestorationError::NotAuthorized);
        }

        let versioned = self.store.legitimacy_state().await?;
        let current = versioned.state.current_band;

        if current.is_terminal() {
            return Err(RestorationError::Terminal);
        }
        if target_band.severity() >= current.severity() {
            return Err(RestorationError::NotUpward {
                current,
                requested: target_band,
            });
        }
        let allowed = match current.one_step_up() {
            Some(allowed) => allowed,
            None => return Err(RestorationError::Terminal),
        };
        if target_band != allowed {
            return Err(RestorationError::NotOneStep { current, allowed });
        }
        if reason.trim().is_empty() {
            return Err(RestorationError::BlankReason);
        }
        if evidence.trim().is_empty() {
            return Err(RestorationError::BlankEvidence);
        }

        let acknowledgment = RestorationAcknowledgment::new(
            operator_id.clone(),
            current,
            target_band,
            reason,
            evidence,
            self.clock.now(),
        );
        self.store
            .append_acknowledgment(acknowledgment.clone())
            .await?;

        let transition = Transition::acknowledged(
            current,
            target_band,
            operator_id,
            acknowledgment.id.clone(),
            reason,
            self.clock.now(),
        );
        let restored_at = transition.timestamp;

        let state = match self
            .store
            .record_transition(versioned.version, transition)
            .await
        {
            Ok(state) => state,
            Err(source) => {
                // Ledger and snapshot are now divergent. Integrity outranks
                // availability: surface, never hide.
                error!(
                    acknowledgment = %acknowledgment.id,
                    %source,
                    "acknowledgment committed but transition write failed"
                );
                return Err(RestorationError::AcknowledgmentOrphaned {
                    acknowledgment_id: acknowledgment.id,
                    source,
                });
            }
        };

        info!(
            from = %current,
            to = %target_band,
            operator = %operator_id,
            acknowledgment = %acknowledgment.id,
            "legitimacy band restored"
        );

        let acknowledged = RestorationAcknowledged {
            acknowledgment_id: acknowledgment.id.clone(),
            operator_id: operator_id.clone(),
            from_band: current,
            to_band: target_band,
            acknowledged_at: acknowledgment.acknowledged_at,
        };
        self.emitter
            .emit(
                events::RESTORATION_ACKNOWLEDGED,
                &operator_id.0,
                to_payload(&acknowledged)?,
            )
            .await?;

        let increased = BandIncreased {
            from_band: current,
            to_band: target_band,
            operator_id: operator_id.clone(),
            acknowledgment_id: acknowledgment.id.clone(),
            reason: reason.to_string(),
            restored_at,
        };
        self.emitter
            .emit(events::BAND_INCREASED, &operator_id.0, to_payload(&increased)?)
            .await?;

        Ok(RestorationGrant {
            state,
            acknowledgment,
        })
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, EmitError> {
    serde_json::to_value(value).map_err(|e| EmitError::Serialization(e.to_string()))
}
