//! Property tests: engine invariants hold under arbitrary operation
//! sequences.
//!
//! Drives random interleavings of violations and restorations through the
//! orchestrators and checks that the violation count is monotone, the band
//! only moves through committed transitions, and the history chain stays
//! intact.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use legitimacy_engine::{
    DecayService, ManualClock, RecordingEmitter, RestorationService, StaticPermissions,
    RESTORE_ACTION,
};
use legitimacy_policy::SeverityPolicy;
use legitimacy_store::{verify_chain, AcknowledgmentStore, InMemoryLegitimacyStore, StateStore};
use legitimacy_types::{Band, OperatorId, TransitionKind};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const VIOLATION_TYPES: [&str; 5] = [
    "override.missing_justification",
    "attestation.stale",
    "coercion.filter_blocked",
    "coercion.filter_bypassed",
    "some.unknown_type",
];

#[derive(Debug, Clone)]
enum Op {
    Violate(usize),
    Restore,
}

fn op_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0..VIOLATION_TYPES.len()).prop_map(Op::Violate),
            Just(Op::Restore),
        ],
        0..24,
    )
}

fn start() -> DateTime<Utc> {
    "2025-06-01T08:00:00Z".parse().unwrap()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_invariants_hold_under_arbitrary_interleavings(ops in op_strategy()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        rt.block_on(async move {
            let operator = OperatorId::new("prop-operator");
            let store = Arc::new(InMemoryLegitimacyStore::new());
            store.initialize_state(Band::Stable, start()).await.unwrap();
            let emitter = Arc::new(RecordingEmitter::new());
            let clock = Arc::new(ManualClock::starting_at(start()));
            let decay = DecayService::new(
                store.clone(),
                emitter.clone(),
                clock.clone(),
                SeverityPolicy::builtin(),
            );
            let restoration = RestorationService::new(
                Arc::new(StaticPermissions::new().allow(&operator, RESTORE_ACTION)),
                store.clone(),
                emitter,
                clock,
            );

            let mut last_count = 0u64;
            for (index, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Violate(type_index) => {
                        decay
                            .process_violation(
                                &format!("evt-{index}"),
                                VIOLATION_TYPES[type_index],
                            )
                            .await
                            .expect("decay never fails for policy reasons");
                    }
                    Op::Restore => {
                        let current = store.current_band().await.unwrap();
                        if let Some(target) = current.one_step_up() {
                            // A well-formed one-step request from a
                            // non-terminal band must succeed.
                            restoration
                                .request_restoration(
                                    &operator,
                                    target,
                                    "routine recovery",
                                    "report://prop",
                                )
                                .await
                                .expect("one-step restoration must succeed");
                        } else {
                            // STABLE has nothing above it and FAILED is
                            // terminal; both refuse every target.
                            for target in Band::all() {
                                assert!(restoration
                                    .request_restoration(
                                        &operator,
                                        target,
                                        "routine recovery",
                                        "report://prop",
                                    )
                                    .await
                                    .is_err());
                            }
                        }
                    }
                }

                let count = store.violation_count().await.unwrap();
                assert!(count >= last_count, "violation count must be monotone");
                last_count = count;
            }

            // The history is a verified chain, and automatic transitions
            // account for the entire violation count.
            let history = store.transition_history(None, None).await.unwrap();
            verify_chain(&history).unwrap();
            let automatic = history
                .iter()
                .filter(|r| r.transition.kind == TransitionKind::Automatic)
                .count() as u64;
            assert_eq!(automatic, last_count);

            // Accountability: every acknowledged transition resolves to a
            // ledger entry with matching bands.
            for record in &history {
                if record.transition.kind == TransitionKind::Acknowledged {
                    let ack_id = record
                        .transition
                        .acknowledgment_id
                        .clone()
                        .expect("acknowledged transition must carry an acknowledgment id");
                    let ack = store
                        .acknowledgment(&ack_id)
                        .await
                        .unwrap()
                        .expect("acknowledgment id must resolve");
                    assert_eq!(ack.from_band, record.transition.from_band);
                    assert_eq!(ack.to_band, record.transition.to_band);
                }
            }
        });
    }
}
