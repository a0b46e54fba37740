#![deny(unsafe_code)]
//! Legitimacy orchestration: automatic decay and acknowledged restoration.
//!
//! This crate provides:
//! - **Collaborator ports** for authorization, event emission, and time
//!   ([`PermissionPort`], [`EventEmitter`], [`TimeAuthority`]) with
//!   reference implementations for local and test use.
//! - **Decay orchestration** ([`DecayService`]): objective, unconditional
//!   downward movement driven by violation events.
//! - **Restoration orchestration** ([`RestorationService`]): deliberate,
//!   human-acknowledged, single-step upward movement.
//! - **Query surface** ([`LegitimacyQueryService`]) consumed by outer API
//!   layers.
//!
//! The asymmetry is the point: decay never consults authorization and may
//! jump several bands at once; restoration is authorized, acknowledged, and
//! limited to exactly one step. `FAILED` is terminal through every path
//! here.

pub mod decay;
pub mod error;
pub mod ports;
pub mod query;
pub mod restoration;

pub use decay::{DecayOutcome, DecayService};
pub use error::{DecayError, EmitError, RestorationError};
pub use ports::{
    EmittedEvent, EventEmitter, ManualClock, PermissionPort, RecordingEmitter, StaticPermissions,
    SystemClock, TimeAuthority, RESTORE_ACTION,
};
pub use query::LegitimacyQueryService;
pub use restoration::{RestorationGrant, RestorationService};
