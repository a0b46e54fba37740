#![deny(unsafe_code)]
//! Core legitimacy types: the band domain, state snapshots, transition and
//! acknowledgment records, and the domain event vocabulary.
//!
//! This crate provides:
//! - **Band domain** with severity ordering and structural adjacency rules
//!   ([`Band`]).
//! - **Records** for the current snapshot and the append-only history
//!   ([`LegitimacyState`], [`Transition`], [`RestorationAcknowledgment`]).
//! - **Event payloads** emitted on band movement ([`BandDecreased`],
//!   [`BandIncreased`]) and for the audit trail.

pub mod band;
pub mod events;
pub mod state;

// Re-exports for convenience.
pub use band::Band;
pub use events::{
    BandDecreased, BandIncreased, RestorationAcknowledged, UnauthorizedRestorationAttempt,
    BAND_DECREASED, BAND_INCREASED, RESTORATION_ACKNOWLEDGED, UNAUTHORIZED_RESTORATION_ATTEMPT,
};
pub use state::{
    AcknowledgmentId, LegitimacyState, OperatorId, RestorationAcknowledgment, Transition,
    TransitionId, TransitionKind, SYSTEM_ACTOR,
};
