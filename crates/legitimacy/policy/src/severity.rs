//! Violation severity classification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Impact severity of a violation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationSeverity {
    /// Drops the band by one level.
    Minor,
    /// Drops the band by two levels.
    Major,
    /// Jumps to `COMPROMISED` unless already at or past that severity.
    Critical,
    /// Jumps to `FAILED` from any non-terminal band.
    Integrity,
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViolationSeverity::Minor => "MINOR",
            ViolationSeverity::Major => "MAJOR",
            ViolationSeverity::Critical => "CRITICAL",
            ViolationSeverity::Integrity => "INTEGRITY",
        };
        write!(f, "{name}")
    }
}

/// Classification result. `recognized` is false when the violation type was
/// absent from the table and the fallback severity was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedViolation {
    pub severity: ViolationSeverity,
    pub recognized: bool,
}

/// Maps violation-type identifiers to severities.
///
/// The table is explicit configuration: deployments may extend it or harden
/// the `fallback` applied to unrecognized identifiers. The built-in fallback
/// is `Minor`, which is the weakest response — operators who consider that
/// unsafe for novel violation types should configure a harsher one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeverityPolicy {
    pub table: HashMap<String, ViolationSeverity>,
    pub fallback: ViolationSeverity,
}

impl SeverityPolicy {
    /// The built-in governance violation vocabulary.
    pub fn builtin() -> Self {
        let mut table = HashMap::new();
        let entries: [(&str, ViolationSeverity); 12] = [
            // Minor: procedural gaps, recoverable by routine correction.
            ("override.missing_justification", ViolationSeverity::Minor),
            ("attestation.stale", ViolationSeverity::Minor),
            ("anomaly.threshold_warning", ViolationSeverity::Minor),
            // Major: an enforcement surface was engaged or circumvented.
            ("coercion.filter_blocked", ViolationSeverity::Major),
            ("override.scope_exceeded", ViolationSeverity::Major),
            ("anomaly.pattern_detected", ViolationSeverity::Major),
            // Critical: a safety control demonstrably failed.
            ("coercion.filter_bypassed", ViolationSeverity::Critical),
            ("override.abuse_confirmed", ViolationSeverity::Critical),
            ("attestation.independence_lost", ViolationSeverity::Critical),
            // Integrity: the audit substrate itself is untrustworthy.
            ("chain.discontinuity", ViolationSeverity::Integrity),
            ("chain.tamper_detected", ViolationSeverity::Integrity),
            ("audit.log_falsified", ViolationSeverity::Integrity),
        ];
        for (violation_type, severity) in entries {
            table.insert(violation_type.to_string(), severity);
        }
        Self {
            table,
            fallback: ViolationSeverity::Minor,
        }
    }

    /// Override the fallback applied to unrecognized violation types.
    pub fn with_fallback(mut self, fallback: ViolationSeverity) -> Self {
        self.fallback = fallback;
        self
    }

    /// Classify a violation-type identifier.
    pub fn classify(&self, violation_type: &str) -> ClassifiedViolation {
        match self.table.get(violation_type) {
            Some(severity) => ClassifiedViolation {
                severity: *severity,
                recognized: true,
            },
            None => {
                warn!(
                    violation_type,
                    fallback = %self.fallback,
                    "unrecognized violation type, applying fallback severity"
                );
                ClassifiedViolation {
                    severity: self.fallback,
                    recognized: false,
                }
            }
        }
    }
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}
