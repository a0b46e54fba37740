//! The legitimacy band: a five-level ordered trust/health domain.

use serde::{Deserialize, Serialize};

/// System-wide legitimacy band, ordered by severity.
///
/// Severity is the sole ordering key: `Stable` (0) is healthiest, `Failed`
/// (4) is terminal. `Failed` has no outgoing edges through this engine;
/// leaving it requires reconstitution, which is not expressible here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    Stable,
    Strained,
    Eroding,
    Compromised,
    Failed,
}

impl Band {
    /// Integer severity rank: 0 healthiest, 4 worst.
    pub fn severity(&self) -> u8 {
        match self {
            Band::Stable => 0,
            Band::Strained => 1,
            Band::Eroding => 2,
            Band::Compromised => 3,
            Band::Failed => 4,
        }
    }

    /// Inverse of [`Band::severity`]. Returns `None` above 4.
    pub fn from_severity(severity: u8) -> Option<Band> {
        match severity {
            0 => Some(Band::Stable),
            1 => Some(Band::Strained),
            2 => Some(Band::Eroding),
            3 => Some(Band::Compromised),
            4 => Some(Band::Failed),
            _ => None,
        }
    }

    /// `Failed` is terminal: no transition out of it is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Band::Failed)
    }

    /// Structural legality of a transition from `self` to `target`.
    ///
    /// Downward movement (worsening) is legal at any distance; upward
    /// movement (recovery) is legal only one severity step at a time.
    /// This encodes adjacency only — it knows nothing about authorization
    /// or acknowledgment.
    pub fn can_transition_to(&self, target: Band) -> bool {
        if self.is_terminal() || target == *self {
            return false;
        }
        if target.severity() > self.severity() {
            return true;
        }
        target.severity() + 1 == self.severity()
    }

    /// The only band a single restoration step may reach, if any.
    pub fn one_step_up(&self) -> Option<Band> {
        if self.is_terminal() {
            return None;
        }
        self.severity()
            .checked_sub(1)
            .and_then(Band::from_severity)
    }

    /// All five bands, healthiest first.
    pub fn all() -> [Band; 5] {
        [
            Band::Stable,
            Band::Strained,
            Band::Eroding,
            Band::Compromised,
            Band::Failed,
        ]
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Band::Stable => "STABLE",
            Band::Strained => "STRAINED",
            Band::Eroding => "ERODING",
            Band::Compromised => "COMPROMISED",
            Band::Failed => "FAILED",
        };
        write!(f, "{name}")
    }
}
