//! Gauge display helpers: pollutant display maxima and percentage fills.
//!
//! Enrichment happens at read time, not at normalization time, so it is
//! idempotent and side-effect-free.

use ved_api::air_quality::{AirPollutant, AirQualitySummary};
use ved_utils::bounds;

/// Display ceiling per pollutant name for gauge rendering.
pub static POLLUTANT_GAUGE_MAX: &[(&str, f64)] = &[
    ("PM2.5", 100.0),
    ("PM10", 100.0),
    ("NO₂", 100.0),
    ("NO2", 100.0),
    ("O3", 100.0),
];

/// Ceiling used for pollutant names not in the table.
pub const DEFAULT_GAUGE_MAX: f64 = 100.0;

/// Display ceiling for a pollutant name.
pub fn gauge_max(name: &str) -> f64 {
    POLLUTANT_GAUGE_MAX
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, max)| *max)
        .unwrap_or(DEFAULT_GAUGE_MAX)
}

/// Return a copy of the snapshot with every pollutant's `max` assigned
/// from the lookup table.
pub fn with_gauge_max(summary: &AirQualitySummary) -> AirQualitySummary {
    let mut enriched = summary.clone();
    for pollutant in &mut enriched.pollutants {
        pollutant.max = Some(gauge_max(&pollutant.name));
    }
    enriched
}

/// Gauge fill percentage for a pollutant, clamped to [0, 100].
pub fn pollutant_percentage(pollutant: &AirPollutant) -> f64 {
    let max = pollutant.max.unwrap_or(DEFAULT_GAUGE_MAX);
    if max == 0.0 {
        return 0.0;
    }
    bounds::clamp_percentage(pollutant.value / max * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ved_api::air_quality;

    #[test]
    fn test_gauge_max_lookup() {
        assert_eq!(gauge_max("PM2.5"), 100.0);
        assert_eq!(gauge_max("NO₂"), 100.0);
        assert_eq!(gauge_max("SO2"), DEFAULT_GAUGE_MAX);
    }

    #[test]
    fn test_with_gauge_max_idempotent() {
        let summary = air_quality::simulated();
        let once = with_gauge_max(&summary);
        let twice = with_gauge_max(&once);
        assert_eq!(once, twice);
        assert!(once.pollutants.iter().all(|p| p.max == Some(100.0)));
        // source snapshot untouched
        assert!(summary.pollutants.iter().all(|p| p.max.is_none()));
    }

    #[test]
    fn test_pollutant_percentage() {
        let pollutant = AirPollutant {
            name: "PM2.5".to_string(),
            value: 45.0,
            unit: "µg/m³".to_string(),
            max: Some(100.0),
        };
        assert_eq!(pollutant_percentage(&pollutant), 45.0);

        let over = AirPollutant { value: 140.0, ..pollutant.clone() };
        assert_eq!(pollutant_percentage(&over), 100.0);

        let degenerate = AirPollutant { max: Some(0.0), ..pollutant };
        assert_eq!(pollutant_percentage(&degenerate), 0.0);
    }
}
