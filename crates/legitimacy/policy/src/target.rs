//! Decay target computation.

use legitimacy_types::Band;

use crate::severity::ViolationSeverity;

/// Compute the band a violation of `severity` decays `current` to.
///
/// Pure and deterministic. The result is clamped at `Failed` and is never
/// an improvement over `current`: a `Critical` violation at `Compromised`
/// or `Failed` leaves the band where it is rather than "lifting" it.
pub fn calculate_target_band(current: Band, severity: ViolationSeverity) -> Band {
    match severity {
        ViolationSeverity::Minor => drop_bands(current, 1),
        ViolationSeverity::Major => drop_bands(current, 2),
        ViolationSeverity::Critical => {
            if current.severity() >= Band::Compromised.severity() {
                current
            } else {
                Band::Compromised
            }
        }
        ViolationSeverity::Integrity => Band::Failed,
    }
}

fn drop_bands(current: Band, distance: u8) -> Band {
    let severity = current.severity().saturating_add(distance);
    Band::from_severity(severity.min(Band::Failed.severity()))
        .unwrap_or(Band::Failed)
}
