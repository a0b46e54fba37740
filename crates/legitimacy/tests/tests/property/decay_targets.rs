//! Property tests: decay target computation is clamped and never improves.

use legitimacy_policy::{calculate_target_band, ViolationSeverity};
use legitimacy_types::Band;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_band() -> impl Strategy<Value = Band> {
    prop_oneof![
        Just(Band::Stable),
        Just(Band::Strained),
        Just(Band::Eroding),
        Just(Band::Compromised),
        Just(Band::Failed),
    ]
}

fn arb_severity() -> impl Strategy<Value = ViolationSeverity> {
    prop_oneof![
        Just(ViolationSeverity::Minor),
        Just(ViolationSeverity::Major),
        Just(ViolationSeverity::Critical),
        Just(ViolationSeverity::Integrity),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// A decay target is never an improvement over the current band.
    #[test]
    fn target_never_improves(current in arb_band(), severity in arb_severity()) {
        let target = calculate_target_band(current, severity);
        prop_assert!(target.severity() >= current.severity());
    }

    /// Fixed drop distances clamp at the terminal band.
    #[test]
    fn fixed_drops_clamp_at_failed(current in arb_band()) {
        let minor = calculate_target_band(current, ViolationSeverity::Minor);
        let major = calculate_target_band(current, ViolationSeverity::Major);
        prop_assert_eq!(
            minor.severity(),
            (current.severity() + 1).min(Band::Failed.severity())
        );
        prop_assert_eq!(
            major.severity(),
            (current.severity() + 2).min(Band::Failed.severity())
        );
    }

    /// Critical jumps to COMPROMISED but never lifts a worse band.
    #[test]
    fn critical_floors_at_compromised(current in arb_band()) {
        let target = calculate_target_band(current, ViolationSeverity::Critical);
        if current.severity() >= Band::Compromised.severity() {
            prop_assert_eq!(target, current);
        } else {
            prop_assert_eq!(target, Band::Compromised);
        }
    }

    /// Integrity always lands on FAILED.
    #[test]
    fn integrity_always_fails(current in arb_band()) {
        prop_assert_eq!(
            calculate_target_band(current, ViolationSeverity::Integrity),
            Band::Failed
        );
    }

    /// The computation is deterministic.
    #[test]
    fn computation_is_deterministic(current in arb_band(), severity in arb_severity()) {
        prop_assert_eq!(
            calculate_target_band(current, severity),
            calculate_target_band(current, severity)
        );
    }
}
