//! Property tests: the transition rule truth table over all band pairs.

use legitimacy_policy::{validate_transition, TransitionRuleViolation};
use legitimacy_types::{Band, TransitionKind};
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

fn arb_kind() -> impl Strategy<Value = TransitionKind> {
    prop_oneof![
        Just(TransitionKind::Automatic),
        Just(TransitionKind::Acknowledged),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 100_000, ..ProptestConfig::default() })]

    /// The validator agrees with the severity formula for every triple.
    #[test]
    fn validator_matches_severity_formula(
        current in arb_band(),
        target in arb_band(),
        kind in arb_kind(),
    ) {
        let result = validate_transition(current, target, kind);
        let expected_ok = !current.is_terminal()
            && target != current
            && (target.severity() > current.severity()
                || (kind == TransitionKind::Acknowledged
                    && current.severity() == target.severity() + 1));
        prop_assert_eq!(result.is_ok(), expected_ok);
    }

    /// Structural adjacency is exactly what the acknowledged kind permits.
    #[test]
    fn adjacency_equals_acknowledged_validation(
        current in arb_band(),
        target in arb_band(),
    ) {
        let structurally_legal = current.can_transition_to(target);
        let validated =
            validate_transition(current, target, TransitionKind::Acknowledged).is_ok();
        prop_assert_eq!(structurally_legal, validated);
    }

    /// From the terminal band every proposal fails with the terminal reason.
    #[test]
    fn terminal_band_always_reports_terminal(
        target in arb_band(),
        kind in arb_kind(),
    ) {
        let err = validate_transition(Band::Failed, target, kind).unwrap_err();
        let is_terminal = matches!(err, TransitionRuleViolation::Terminal { .. });
        prop_assert!(is_terminal);
    }

    /// Multi-step upward proposals always name the one legal target.
    #[test]
    fn multi_step_errors_name_the_allowed_band(
        current in arb_band(),
        target in arb_band(),
    ) {
        prop_assume!(!current.is_terminal());
        prop_assume!(target.severity() + 1 < current.severity());

        let err = validate_transition(current, target, TransitionKind::Acknowledged)
            .unwrap_err();
        match err {
            TransitionRuleViolation::MultiStep { allowed, .. } => {
                prop_assert_eq!(Some(allowed), current.one_step_up());
            }
            other => prop_assert!(false, "expected MultiStep, got {other:?}"),
        }
    }
}
