//! Air quality feed normalization.
//!
//! Maps a raw WAQI/aqicn feed payload, or the absence of one, to an
//! [`AirQualitySummary`]. Pollutant sub-readings are independently
//! optional; one [`AirPollutant`] is emitted per sub-reading whose value
//! is present, in fetch order.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Unit reported by the feed for all pollutant concentrations.
pub const CONCENTRATION_UNIT: &str = "µg/m³";

/// Category reported when the feed omits the dominant pollutant.
pub const CATEGORY_UNKNOWN: &str = "N/D";

/// One measured or simulated pollutant value.
///
/// `max` is a display ceiling for gauge rendering; it is assigned at read
/// time (see `ved-data`), not at normalization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirPollutant {
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Aggregate air quality state at a point in time.
///
/// Replaced wholesale on each successful fetch; the pollutant list keeps
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySummary {
    pub aqi: i32,
    pub category: String,
    pub last_updated: String,
    pub pollutants: Vec<AirPollutant>,
}

/// Raw WAQI feed payload. Every field is optional; the upstream schema is
/// a third-party contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaqiFeed {
    pub data: Option<WaqiData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaqiData {
    pub aqi: Option<i32>,
    pub dominentpol: Option<String>,
    pub time: Option<WaqiTime>,
    pub iaqi: Option<WaqiIaqi>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaqiTime {
    pub s: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaqiIaqi {
    pub pm25: Option<WaqiReading>,
    pub pm10: Option<WaqiReading>,
    pub no2: Option<WaqiReading>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaqiReading {
    pub v: Option<f64>,
}

/// Normalize a raw WAQI payload into an [`AirQualitySummary`].
///
/// Missing top-level fields default to 0 / "N/D" / the current time.
pub fn normalize(feed: WaqiFeed) -> AirQualitySummary {
    let data = feed.data.unwrap_or_default();
    let iaqi = data.iaqi.unwrap_or_default();

    let mut pollutants = Vec::new();
    if let Some(value) = iaqi.pm25.and_then(|r| r.v) {
        pollutants.push(pollutant("PM2.5", value));
    }
    if let Some(value) = iaqi.pm10.and_then(|r| r.v) {
        pollutants.push(pollutant("PM10", value));
    }
    if let Some(value) = iaqi.no2.and_then(|r| r.v) {
        pollutants.push(pollutant("NO₂", value));
    }

    AirQualitySummary {
        aqi: data.aqi.unwrap_or(0),
        category: data
            .dominentpol
            .unwrap_or_else(|| CATEGORY_UNKNOWN.to_string()),
        last_updated: data
            .time
            .and_then(|t| t.s)
            .unwrap_or_else(timestamp_now),
        pollutants,
    }
}

/// Fixed snapshot served when no credential is configured.
pub fn simulated() -> AirQualitySummary {
    AirQualitySummary {
        aqi: 67,
        category: "Moderate".to_string(),
        last_updated: timestamp_now(),
        pollutants: vec![
            pollutant("PM2.5", 45.0),
            pollutant("PM10", 62.0),
            pollutant("NO₂", 38.0),
            pollutant("O3", 72.0),
        ],
    }
}

fn pollutant(name: &str, value: f64) -> AirPollutant {
    AirPollutant {
        name: name.to_string(),
        value,
        unit: CONCENTRATION_UNIT.to_string(),
        max: None,
    }
}

fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed_from(value: serde_json::Value) -> WaqiFeed {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_payload() {
        let feed = feed_from(json!({
            "data": {
                "aqi": 71,
                "dominentpol": "pm10",
                "time": { "s": "2024-03-02 11:00:00" },
                "iaqi": {
                    "pm25": { "v": 41.0 },
                    "pm10": { "v": 58.0 },
                    "no2": { "v": 23.5 }
                }
            }
        }));
        let summary = normalize(feed);
        assert_eq!(summary.aqi, 71);
        assert_eq!(summary.category, "pm10");
        assert_eq!(summary.last_updated, "2024-03-02 11:00:00");
        let names: Vec<&str> = summary.pollutants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PM2.5", "PM10", "NO₂"]);
        assert_eq!(summary.pollutants[2].value, 23.5);
        assert!(summary.pollutants.iter().all(|p| p.unit == CONCENTRATION_UNIT));
        assert!(summary.pollutants.iter().all(|p| p.max.is_none()));
    }

    #[test]
    fn test_normalize_defaults_when_iaqi_absent() {
        let feed = feed_from(json!({ "data": {} }));
        let summary = normalize(feed);
        assert!(summary.pollutants.is_empty());
        assert_eq!(summary.aqi, 0);
        assert_eq!(summary.category, CATEGORY_UNKNOWN);
        assert!(!summary.last_updated.is_empty());
    }

    #[test]
    fn test_normalize_skips_null_sub_readings() {
        let feed = feed_from(json!({
            "data": {
                "aqi": 12,
                "iaqi": {
                    "pm25": { "v": null },
                    "pm10": { "v": 30.0 }
                }
            }
        }));
        let summary = normalize(feed);
        let names: Vec<&str> = summary.pollutants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PM10"]);
    }

    #[test]
    fn test_simulated_snapshot() {
        let summary = simulated();
        assert_eq!(summary.aqi, 67);
        assert_eq!(summary.category, "Moderate");
        assert_eq!(summary.pollutants.len(), 4);
        assert_eq!(summary.pollutants[0].name, "PM2.5");
        assert_eq!(summary.pollutants[0].value, 45.0);
    }
}
