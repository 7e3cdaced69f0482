//! Upstream API models, normalizers and the snapshot aggregator.
//!
//! Each sub-pipeline (air quality, weather, traffic, pollution history)
//! maps a raw upstream feed, or the absence of one, to a stable snapshot
//! record. The [`aggregator::Aggregator`] owns the published snapshots.

pub mod aggregator;
pub mod air_quality;
pub mod credentials;
pub mod error;
pub mod history;
pub mod traffic;
pub mod weather;

/// Reference coordinate for station lookups: Valencia city center.
pub const CITY_LAT: f64 = 39.4699;
pub const CITY_LON: f64 = -0.3763;

/// City slug used by the air quality feed URL.
pub const CITY_SLUG: &str = "valencia";
