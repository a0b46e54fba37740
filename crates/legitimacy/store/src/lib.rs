#![deny(unsafe_code)]
//! Persistence boundary for the legitimacy engine.
//!
//! This crate defines the storage contract the orchestrators write through:
//! - a singleton, version-numbered legitimacy snapshot
//! - an append-only, blake3 hash-chained transition history
//! - an append-only restoration acknowledgment ledger
//!
//! Design stance:
//! - `record_transition` is the single serialization point: it appends the
//!   history entry and replaces the snapshot in one atomic step, guarded by
//!   an optimistic version compare-and-swap so racing writers cannot lose
//!   updates.
//! - The in-memory adapter is deterministic and test-friendly. Production
//!   deployments require a transactional append-only backend; the trait
//!   contract, not the adapter, carries the durability requirement.

pub mod error;
pub mod memory;
pub mod model;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLegitimacyStore;
pub use model::{verify_chain, QueryWindow, TransitionRecord, VersionedState};
pub use traits::{AcknowledgmentStore, LegitimacyStore, StateStore};
