//! Pollution history: daily aggregation of raw measurements and the
//! simulated fallback.
//!
//! Raw measurements come from the OpenAQ measurements feed, filtered to
//! four parameter kinds. Grouping is by UTC calendar date; a parameter
//! with zero samples on a date yields 0, not an omitted field. When no
//! usable data is available the history is simulated instead, so callers
//! always receive a populated sequence.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use ved_utils::dates;

/// Parameter kinds requested from the measurements feed.
pub const PARAMETERS: [&str; 4] = ["pm25", "pm10", "no2", "o3"];

/// Baseline concentrations for simulated history (µg/m³).
const BASELINE_PM25: f64 = 45.0;
const BASELINE_PM10: f64 = 62.0;
const BASELINE_NO2: f64 = 38.0;
const BASELINE_O3: f64 = 72.0;

/// One day's averaged pollutant readings.
///
/// Published sequences are sorted ascending by date string; the ISO date
/// format makes lexicographic order chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionHistory {
    /// ISO date string, "YYYY-MM-DD"
    pub date: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
}

/// Raw location search feed: `results[0].id` is the station of interest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsFeed {
    #[serde(default)]
    pub results: Vec<LocationResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationResult {
    pub id: i64,
}

/// Raw measurements feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementsFeed {
    #[serde(default)]
    pub results: Vec<Measurement>,
}

/// One raw measurement sample.
#[derive(Debug, Clone, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub value: f64,
    pub date: MeasurementDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementDate {
    /// RFC 3339 timestamp, e.g. "2024-03-01T06:00:00+00:00"
    pub utc: String,
}

/// Group raw measurements by UTC calendar date and compute the arithmetic
/// mean per parameter per date. The result is sorted ascending by date.
///
/// Measurements with unparseable timestamps are skipped.
pub fn daily_averages(measurements: Vec<Measurement>) -> Vec<PollutionHistory> {
    let grouped = measurements
        .into_iter()
        .filter_map(|m| utc_date(&m.date.utc).map(|d| (d, m)))
        .into_group_map();

    let mut history: Vec<PollutionHistory> = grouped
        .into_iter()
        .map(|(date, samples)| PollutionHistory {
            date: dates::format_date(&date),
            pm25: parameter_mean(&samples, "pm25"),
            pm10: parameter_mean(&samples, "pm10"),
            no2: parameter_mean(&samples, "no2"),
            o3: Some(parameter_mean(&samples, "o3")),
        })
        .collect();

    history.sort_by(|a, b| a.date.cmp(&b.date));
    history
}

/// Generate one simulated history point per day, from `days - 1` ago
/// through today ascending. Each field is its baseline scaled by an
/// independent uniform factor in [0.8, 1.2), rounded to the nearest
/// integer.
pub fn simulate(days: u32, rng: &mut impl Rng) -> Vec<PollutionHistory> {
    let today = dates::today();
    let mut history = Vec::with_capacity(days as usize);

    for offset in (0..i64::from(days)).rev() {
        let date = today - TimeDelta::days(offset);
        history.push(PollutionHistory {
            date: dates::format_date(&date),
            pm25: vary(BASELINE_PM25, rng),
            pm10: vary(BASELINE_PM10, rng),
            no2: vary(BASELINE_NO2, rng),
            o3: Some(vary(BASELINE_O3, rng)),
        });
    }

    history
}

fn vary(baseline: f64, rng: &mut impl Rng) -> f64 {
    (baseline * rng.gen_range(0.8..1.2)).round()
}

fn utc_date(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

fn parameter_mean(samples: &[Measurement], parameter: &str) -> f64 {
    let values: Vec<f64> = samples
        .iter()
        .filter(|m| m.parameter == parameter)
        .map(|m| m.value)
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn measurement(parameter: &str, value: f64, utc: &str) -> Measurement {
        Measurement {
            parameter: parameter.to_string(),
            value,
            date: MeasurementDate {
                utc: utc.to_string(),
            },
        }
    }

    #[test]
    fn test_daily_averages() {
        let measurements = vec![
            measurement("pm25", 10.0, "2024-03-01T06:00:00+00:00"),
            measurement("pm25", 20.0, "2024-03-01T18:00:00+00:00"),
            measurement("pm10", 5.0, "2024-03-02T06:00:00+00:00"),
        ];
        let history = daily_averages(measurements);
        assert_eq!(history.len(), 2);

        let day1 = &history[0];
        assert_eq!(day1.date, "2024-03-01");
        assert_eq!(day1.pm25, 15.0);
        assert_eq!(day1.pm10, 0.0);

        let day2 = &history[1];
        assert_eq!(day2.date, "2024-03-02");
        assert_eq!(day2.pm25, 0.0);
        assert_eq!(day2.pm10, 5.0);
        assert_eq!(day2.o3, Some(0.0));
    }

    #[test]
    fn test_daily_averages_groups_by_utc_date() {
        // 23:30 UTC-2 is 01:30 UTC the next day
        let measurements = vec![measurement("no2", 40.0, "2024-03-01T23:30:00-02:00")];
        let history = daily_averages(measurements);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, "2024-03-02");
        assert_eq!(history[0].no2, 40.0);
    }

    #[test]
    fn test_daily_averages_sorted_ascending() {
        let measurements = vec![
            measurement("pm25", 30.0, "2024-03-05T12:00:00+00:00"),
            measurement("pm25", 10.0, "2024-03-01T12:00:00+00:00"),
            measurement("pm25", 20.0, "2024-03-03T12:00:00+00:00"),
        ];
        let history = daily_averages(measurements);
        let sorted_dates: Vec<&str> = history.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(sorted_dates, vec!["2024-03-01", "2024-03-03", "2024-03-05"]);
    }

    #[test]
    fn test_daily_averages_skips_bad_timestamps() {
        let measurements = vec![
            measurement("pm25", 10.0, "not a timestamp"),
            measurement("pm25", 20.0, "2024-03-01T12:00:00Z"),
        ];
        let history = daily_averages(measurements);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].pm25, 20.0);
    }

    #[test]
    fn test_simulate_structure() {
        let mut rng = StdRng::seed_from_u64(7);
        let history = simulate(5, &mut rng);
        assert_eq!(history.len(), 5);

        for pair in history.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        assert_eq!(
            history.last().unwrap().date,
            dates::format_date(&dates::today())
        );
    }

    #[test]
    fn test_simulate_values_within_variation_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for point in simulate(30, &mut rng) {
            assert!(point.pm25 >= (BASELINE_PM25 * 0.8).floor());
            assert!(point.pm25 <= (BASELINE_PM25 * 1.2).ceil());
            assert_eq!(point.pm25, point.pm25.round());
            assert!(point.o3.is_some());
        }
    }

    #[test]
    fn test_simulate_zero_days() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(simulate(0, &mut rng).is_empty());
    }
}
