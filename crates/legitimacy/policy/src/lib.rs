#![deny(unsafe_code)]
//! Pure legitimacy policy: violation severity classification, decay target
//! computation, and transition rule validation.
//!
//! Everything in this crate is synchronous and deterministic. The
//! orchestrators in `legitimacy-engine` call in here between reads and
//! writes; nothing here touches a clock, a store, or an event bus.

pub mod rules;
pub mod severity;
pub mod target;

pub use rules::{validate_transition, TransitionRuleViolation};
pub use severity::{ClassifiedViolation, SeverityPolicy, ViolationSeverity};
pub use target::calculate_target_band;
