//! Synthesized intraday breakdown for the "last 24h" chart view.
//!
//! There is no hourly data source; a plausible diurnal curve is derived
//! from the most recent daily average using a fixed commute-pattern shape
//! and a deterministic jitter, so the visualization is reproducible across
//! renders. This is an explicit approximation, not measured data.

use serde::Serialize;
use ved_api::history::PollutionHistory;

/// Hour marks with their diurnal factors: low at night, peaking 12:00-16:00.
const HOUR_FACTORS: [(u32, f64); 6] = [
    (0, 0.85),
    (4, 0.75),
    (8, 1.15),
    (12, 1.25),
    (16, 1.35),
    (20, 1.10),
];

/// One synthesized intraday sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySample {
    /// "HH:00" label
    pub label: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
}

impl HourlySample {
    /// Combined display value used by the single-series bar chart.
    pub fn combined(&self) -> f64 {
        (self.pm25 + self.pm10 + self.no2) / 3.0
    }
}

/// Deterministic per-hour jitter in [0.9, 1.09], seeded by the hour mark.
pub fn hour_jitter(hour: u32) -> f64 {
    0.9 + f64::from((hour * 7) % 20) / 100.0
}

/// Derive the six-sample intraday breakdown from the most recent history
/// point. Returns an empty vector when there is no history.
pub fn hourly_breakdown(history: &[PollutionHistory]) -> Vec<HourlySample> {
    let Some(base) = history.last() else {
        return Vec::new();
    };

    HOUR_FACTORS
        .iter()
        .map(|&(hour, factor)| {
            let jitter = hour_jitter(hour);
            HourlySample {
                label: format!("{hour:02}:00"),
                pm25: (base.pm25 * factor * jitter).round(),
                pm10: (base.pm10 * factor * jitter).round(),
                no2: (base.no2 * factor * jitter).round(),
            }
        })
        .collect()
}
