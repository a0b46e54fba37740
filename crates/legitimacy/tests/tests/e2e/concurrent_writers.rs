//! End-to-end test: concurrent violations never lose updates.
//!
//! Two violations computed against the same snapshot must not both commit
//! as if from the same band; the version compare-and-swap forces the loser
//! to recompute from the winner's result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use legitimacy_engine::{DecayService, ManualClock, RecordingEmitter};
use legitimacy_policy::SeverityPolicy;
use legitimacy_store::{verify_chain, InMemoryLegitimacyStore, StateStore};
use legitimacy_types::Band;

fn start() -> DateTime<Utc> {
    "2025-06-01T08:00:00Z".parse().unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_minor_violations_each_advance_the_band() {
    let store = Arc::new(InMemoryLegitimacyStore::new());
    store.initialize_state(Band::Stable, start()).await.unwrap();
    let decay = Arc::new(DecayService::new(
        store.clone(),
        Arc::new(RecordingEmitter::new()),
        Arc::new(ManualClock::starting_at(start())),
        SeverityPolicy::builtin(),
    ));

    let mut handles = Vec::new();
    for n in 0..3 {
        let decay = decay.clone();
        handles.push(tokio::spawn(async move {
            decay
                .process_violation(&format!("evt-{n}"), "attestation.stale")
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.transition_occurred);
        assert_eq!(outcome.bands_dropped, 1);
    }

    // Three MINOR violations from STABLE land on COMPROMISED: no update
    // was lost to a stale read.
    assert_eq!(store.current_band().await.unwrap(), Band::Compromised);
    assert_eq!(store.violation_count().await.unwrap(), 3);

    let history = store.transition_history(None, None).await.unwrap();
    assert_eq!(history.len(), 3);
    verify_chain(&history).unwrap();

    // Each transition decays from the band its predecessor left behind.
    let mut previous_to = Band::Stable;
    for record in &history {
        assert_eq!(record.transition.from_band, previous_to);
        previous_to = record.transition.to_band;
    }
}
