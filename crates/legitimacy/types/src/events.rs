//! Domain and audit event payloads.
//!
//! Event types use the dotted `namespace.event` form consumed by the event
//! bus. Payloads are typed structs so producers and the audit trail agree on
//! field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::state::{AcknowledgmentId, OperatorId};

/// Emitted after an automatic decay transition commits.
pub const BAND_DECREASED: &str = "legitimacy.band_decreased";
/// Emitted after an acknowledged restoration transition commits.
pub const BAND_INCREASED: &str = "legitimacy.band_increased";
/// Audit event recording the acknowledgment itself.
pub const RESTORATION_ACKNOWLEDGED: &str = "legitimacy.restoration_acknowledged";
/// Security audit event for a denied restoration attempt.
pub const UNAUTHORIZED_RESTORATION_ATTEMPT: &str = "security.unauthorized_restoration_attempt";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDecreased {
    pub from_band: Band,
    pub to_band: Band,
    pub severity: String,
    pub violation_type: String,
    pub violation_event_id: String,
    pub violation_count: u64,
    pub transitioned_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandIncreased {
    pub from_band: Band,
    pub to_band: Band,
    pub operator_id: OperatorId,
    pub acknowledgment_id: AcknowledgmentId,
    pub reason: String,
    pub restored_at: DateTime<Utc>,
}

/// Full acknowledgment detail for audit consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationAcknowledged {
    pub acknowledgment_id: AcknowledgmentId,
    pub operator_id: OperatorId,
    pub from_band: Band,
    pub to_band: Band,
    pub acknowledged_at: DateTime<Utc>,
}

/// The caller of a denied restoration sees a generic denial; this payload
/// carries the full actor detail for the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnauthorizedRestorationAttempt {
    pub operator_id: OperatorId,
    pub requested_band: Band,
    pub attempted_at: DateTime<Utc>,
}
