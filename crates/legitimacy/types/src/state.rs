//! State snapshot and append-only history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::band::Band;

/// Actor recorded on automatic transitions.
pub const SYSTEM_ACTOR: &str = "system";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub String);
impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub String);
impl TransitionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcknowledgmentId(pub String);
impl AcknowledgmentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
impl std::fmt::Display for AcknowledgmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a transition was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionKind {
    /// Unilateral decay driven by an objective violation event.
    Automatic,
    /// Human-acknowledged, single-step restoration.
    Acknowledged,
}

/// The current legitimacy snapshot. Singleton per deployment.
///
/// A snapshot is only ever replaced wholesale by applying a validated
/// [`Transition`]; its fields are never patched independently.
/// `violation_count` is monotone and is never reset by restoration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegitimacyState {
    pub current_band: Band,
    pub entered_at: DateTime<Utc>,
    pub violation_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_triggering_event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_kind: Option<TransitionKind>,
}

impl LegitimacyState {
    /// The snapshot written at initialization, before any transition.
    pub fn initial(band: Band, at: DateTime<Utc>) -> Self {
        Self {
            current_band: band,
            entered_at: at,
            violation_count: 0,
            last_triggering_event_id: None,
            last_transition_kind: None,
        }
    }

    /// The snapshot that results from applying `transition` to `self`.
    pub fn apply(&self, transition: &Transition) -> Self {
        let violation_count = match transition.kind {
            TransitionKind::Automatic => self.violation_count + 1,
            TransitionKind::Acknowledged => self.violation_count,
        };
        Self {
            current_band: transition.to_band,
            entered_at: transition.timestamp,
            violation_count,
            last_triggering_event_id: transition.triggering_event_id.clone(),
            last_transition_kind: Some(transition.kind),
        }
    }
}

/// One immutable history entry: a committed band movement.
///
/// `triggering_event_id` is present iff the transition is automatic;
/// `acknowledgment_id` is present iff it is acknowledged. The constructors
/// make any other combination unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub from_band: Band,
    pub to_band: Band,
    pub kind: TransitionKind,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggering_event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgment_id: Option<AcknowledgmentId>,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

impl Transition {
    /// Build an automatic (decay) transition.
    ///
    /// # Panics
    ///
    /// Panics if `from == to`, or `reason`/`triggering_event_id` is blank.
    /// Those can only arise from a malformed internal construction, never
    /// from caller input, so they fail fast.
    pub fn automatic(
        from: Band,
        to: Band,
        triggering_event_id: impl Into<String>,
        reason: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let triggering_event_id = triggering_event_id.into();
        let reason = reason.into();
        assert!(from != to, "transition must change the band");
        assert!(
            !triggering_event_id.trim().is_empty(),
            "automatic transition requires a triggering event id"
        );
        assert!(!reason.trim().is_empty(), "transition requires a reason");
        Self {
            id: TransitionId::generate(),
            from_band: from,
            to_band: to,
            kind: TransitionKind::Automatic,
            actor: SYSTEM_ACTOR.to_string(),
            triggering_event_id: Some(triggering_event_id),
            acknowledgment_id: None,
            timestamp,
            reason,
        }
    }

    /// Build an acknowledged (restoration) transition.
    ///
    /// # Panics
    ///
    /// Panics if `from == to` or `reason` is blank; see
    /// [`Transition::automatic`].
    pub fn acknowledged(
        from: Band,
        to: Band,
        operator: &OperatorId,
        acknowledgment_id: AcknowledgmentId,
        reason: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let reason = reason.into();
        assert!(from != to, "transition must change the band");
        assert!(!reason.trim().is_empty(), "transition requires a reason");
        Self {
            id: TransitionId::generate(),
            from_band: from,
            to_band: to,
            kind: TransitionKind::Acknowledged,
            actor: operator.0.clone(),
            triggering_event_id: None,
            acknowledgment_id: Some(acknowledgment_id),
            timestamp,
            reason,
        }
    }
}

/// Durable record of an operator's explicit, evidenced consent to one
/// specific restoration. Written to the ledger before the paired transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationAcknowledgment {
    pub id: AcknowledgmentId,
    pub operator_id: OperatorId,
    pub from_band: Band,
    pub to_band: Band,
    pub reason: String,
    pub evidence: String,
    pub acknowledged_at: DateTime<Utc>,
}

impl RestorationAcknowledgment {
    /// Build an acknowledgment for a single-step restoration.
    ///
    /// # Panics
    ///
    /// Panics unless `to` is exactly one severity step above `from`, or if
    /// `reason`/`evidence` is blank. The restoration orchestrator validates
    /// operator input before constructing, so a panic here is an internal
    /// bug.
    pub fn new(
        operator_id: OperatorId,
        from: Band,
        to: Band,
        reason: impl Into<String>,
        evidence: impl Into<String>,
        acknowledged_at: DateTime<Utc>,
    ) -> Self {
        let reason = reason.into();
        let evidence = evidence.into();
        assert_eq!(
            from.one_step_up(),
            Some(to),
            "acknowledgment must cover exactly one upward step"
        );
        assert!(!reason.trim().is_empty(), "acknowledgment requires a reason");
        assert!(
            !evidence.trim().is_empty(),
            "acknowledgment requires evidence"
        );
        Self {
            id: AcknowledgmentId::generate(),
            operator_id,
            from_band: from,
            to_band: to,
            reason,
            evidence,
            acknowledged_at,
        }
    }
}
