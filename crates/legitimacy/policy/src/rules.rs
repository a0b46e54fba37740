//! Transition rule validation.

use legitimacy_types::{Band, TransitionKind};
use thiserror::Error;

/// Why a proposed transition is illegal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionRuleViolation {
    #[error("{current} is terminal, reconstitution required")]
    Terminal { current: Band },

    #[error("already at target band {band}")]
    AlreadyAtTarget { band: Band },

    #[error("upward transition from {current} to {target} requires acknowledgment")]
    RequiresAcknowledgment { current: Band, target: Band },

    #[error("restoration must be one step at a time: from {current} only {allowed} is reachable")]
    MultiStep { current: Band, allowed: Band },
}

/// Decide whether a proposed `(current, target, kind)` triple is legal.
///
/// Rules, in order: terminal state, same band, downward (always legal
/// regardless of kind), upward (acknowledged and exactly one step).
pub fn validate_transition(
    current: Band,
    target: Band,
    kind: TransitionKind,
) -> Result<(), TransitionRuleViolation> {
    if current.is_terminal() {
        return Err(TransitionRuleViolation::Terminal { current });
    }
    if target == current {
        return Err(TransitionRuleViolation::AlreadyAtTarget { band: target });
    }
    if target.severity() > current.severity() {
        // Decay is objective: legal at any distance, whoever requests it.
        return Ok(());
    }
    if kind != TransitionKind::Acknowledged {
        return Err(TransitionRuleViolation::RequiresAcknowledgment { current, target });
    }
    match current.one_step_up() {
        Some(allowed) if allowed == target => Ok(()),
        Some(allowed) => Err(TransitionRuleViolation::MultiStep { current, allowed }),
        // Unreachable for non-terminal current with target above it, kept
        // total for the type.
        None => Err(TransitionRuleViolation::Terminal { current }),
    }
}
