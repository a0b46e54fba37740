//! Collaborator ports: authorization, event emission, and time.
//!
//! Reference implementations live alongside the traits so harnesses and the
//! outer API layer's local mode can run without external infrastructure.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use legitimacy_types::OperatorId;

use crate::error::EmitError;

/// The capability consulted before any restoration.
pub const RESTORE_ACTION: &str = "legitimacy.restore";

/// Authorization boundary. Only authorization is consulted here;
/// authentication happens upstream.
#[async_trait]
pub trait PermissionPort: Send + Sync {
    async fn has_permission(&self, operator: &OperatorId, action: &str) -> bool;
}

/// Notification boundary. Delivery is at-least-once; implementations must
/// propagate failures rather than swallow them.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn emit(
        &self,
        event_type: &str,
        actor: &str,
        payload: serde_json::Value,
    ) -> Result<(), EmitError>;
}

/// The single source of truth for every recorded timestamp. Domain logic
/// never reads a wall clock directly, which keeps runs deterministic under
/// test.
pub trait TimeAuthority: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time authority for production wiring.
#[derive(Default)]
pub struct SystemClock;

impl TimeAuthority for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap();
        *guard += by;
    }
}

impl TimeAuthority for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Fixed allow-list permission adapter.
#[derive(Default)]
pub struct StaticPermissions {
    grants: HashMap<String, HashSet<String>>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `action` to `operator`.
    pub fn allow(mut self, operator: &OperatorId, action: &str) -> Self {
        self.grants
            .entry(operator.0.clone())
            .or_default()
            .insert(action.to_string());
        self
    }
}

#[async_trait]
impl PermissionPort for StaticPermissions {
    async fn has_permission(&self, operator: &OperatorId, action: &str) -> bool {
        self.grants
            .get(&operator.0)
            .is_some_and(|actions| actions.contains(action))
    }
}

/// An event captured by [`RecordingEmitter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedEvent {
    pub event_type: String,
    pub actor: String,
    pub payload: serde_json::Value,
}

/// Emitter that records every event in memory, for harnesses and tests.
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<EmittedEvent>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events of one type, in order.
    pub fn events_of(&self, event_type: &str) -> Vec<EmittedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}

#[async_trait]
impl EventEmitter for RecordingEmitter {
    async fn emit(
        &self,
        event_type: &str,
        actor: &str,
        payload: serde_json::Value,
    ) -> Result<(), EmitError> {
        self.events.lock().unwrap().push(EmittedEvent {
            event_type: event_type.to_string(),
            actor: actor.to_string(),
            payload,
        });
        Ok(())
    }
}
