//! Weather feed normalization.
//!
//! Maps a raw OpenWeatherMap payload, or the absence of one, to a
//! [`WeatherSummary`] with independent per-field defaulting to 0.

use serde::{Deserialize, Serialize};

/// Multiplier extrapolating the 3-hour cumulative rain field to 24 hours.
const RAIN_3H_TO_24H: f64 = 8.0;

/// Aggregate weather state. All numeric fields default to 0 when the
/// source field is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Temperature in °C
    pub temperature: f64,
    /// Rain over the last hour, mm
    pub rain: f64,
    /// Rain probability, %
    pub rain_probability: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// Estimated rain over 24 hours, mm
    pub rain24h: f64,
}

/// Raw OpenWeatherMap payload; third-party contract, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmFeed {
    pub main: Option<OwmMain>,
    pub clouds: Option<OwmClouds>,
    pub rain: Option<OwmRain>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmMain {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmClouds {
    pub all: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmRain {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

/// Normalize a raw OpenWeatherMap payload into a [`WeatherSummary`].
///
/// `rain24h` is the 3-hour cumulative field scaled by 8 as an
/// approximation when present, else 0. The rain probability is read from
/// cloud cover.
pub fn normalize(feed: OwmFeed) -> WeatherSummary {
    let main = feed.main.unwrap_or_default();
    let rain = feed.rain.unwrap_or_default();

    WeatherSummary {
        temperature: main.temp.unwrap_or(0.0),
        rain: rain.one_hour.unwrap_or(0.0),
        rain_probability: feed.clouds.and_then(|c| c.all).unwrap_or(0.0),
        humidity: main.humidity.unwrap_or(0.0),
        rain24h: rain
            .three_hours
            .map(|mm| mm * RAIN_3H_TO_24H)
            .unwrap_or(0.0),
    }
}

/// Fixed snapshot served when no credential is configured.
pub fn simulated() -> WeatherSummary {
    WeatherSummary {
        temperature: 16.0,
        rain: 2.4,
        rain_probability: 45.0,
        humidity: 68.0,
        rain24h: 8.7,
    }
}
