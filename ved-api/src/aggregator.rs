//! The environmental data aggregator.
//!
//! Owns one latest-value cell per snapshot domain and replaces each
//! snapshot wholesale on successful loads. Cells are `tokio::sync::watch`
//! channels: read accessors clone the latest value, `watch_*` accessors
//! hand out receivers so consumers are notified on publication instead of
//! recomputing on read.
//!
//! Failure policy: air quality and weather failures are logged and leave
//! the previous snapshot in place; history failures fall back to simulated
//! data. No load operation ever returns an error to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use log::{debug, warn};
use tokio::sync::watch;

use crate::air_quality::{self, AirQualitySummary, WaqiFeed};
use crate::credentials::Credentials;
use crate::error::Result;
use crate::history::{self, LocationsFeed, MeasurementsFeed, PollutionHistory};
use crate::traffic::{self, TrafficSummary};
use crate::weather::{self, OwmFeed, WeatherSummary};
use crate::{CITY_LAT, CITY_LON, CITY_SLUG};

/// City query string for the weather feed.
const CITY_QUERY: &str = "Valencia,ES";

/// Search radius around the reference coordinate for station lookups, meters.
const STATION_SEARCH_RADIUS_M: u32 = 50_000;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs for the upstream feeds. Substituting these supports tests and
/// future live-source replacements without changing the consumer contract.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub air_quality: String,
    pub weather: String,
    pub locations: String,
    pub measurements: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            air_quality: "https://api.waqi.info".to_string(),
            weather: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            locations: "https://api.openaq.org/v2/locations".to_string(),
            measurements: "https://api.openaq.org/v2/measurements".to_string(),
        }
    }
}

/// Aggregates the four snapshot domains and publishes them to subscribers.
pub struct Aggregator {
    client: reqwest::Client,
    credentials: Credentials,
    endpoints: Endpoints,
    air_quality: watch::Sender<Option<AirQualitySummary>>,
    weather: watch::Sender<Option<WeatherSummary>>,
    traffic: watch::Sender<Option<TrafficSummary>>,
    history: watch::Sender<Vec<PollutionHistory>>,
    history_generation: AtomicU64,
}

impl Aggregator {
    pub fn new(credentials: Credentials) -> Self {
        Aggregator::with_endpoints(credentials, Endpoints::default())
    }

    pub fn with_endpoints(credentials: Credentials, endpoints: Endpoints) -> Self {
        Aggregator {
            client: reqwest::Client::new(),
            credentials,
            endpoints,
            air_quality: watch::channel(None).0,
            weather: watch::channel(None).0,
            traffic: watch::channel(None).0,
            history: watch::channel(Vec::new()).0,
            history_generation: AtomicU64::new(0),
        }
    }

    /// Latest published air quality snapshot, if any.
    pub fn air_quality(&self) -> Option<AirQualitySummary> {
        self.air_quality.borrow().clone()
    }

    /// Latest published weather snapshot, if any.
    pub fn weather(&self) -> Option<WeatherSummary> {
        self.weather.borrow().clone()
    }

    /// Latest published traffic snapshot, if any.
    pub fn traffic(&self) -> Option<TrafficSummary> {
        self.traffic.borrow().clone()
    }

    /// Latest published pollution history, sorted ascending by date.
    pub fn pollution_history(&self) -> Vec<PollutionHistory> {
        self.history.borrow().clone()
    }

    pub fn watch_air_quality(&self) -> watch::Receiver<Option<AirQualitySummary>> {
        self.air_quality.subscribe()
    }

    pub fn watch_weather(&self) -> watch::Receiver<Option<WeatherSummary>> {
        self.weather.subscribe()
    }

    pub fn watch_traffic(&self) -> watch::Receiver<Option<TrafficSummary>> {
        self.traffic.subscribe()
    }

    pub fn watch_pollution_history(&self) -> watch::Receiver<Vec<PollutionHistory>> {
        self.history.subscribe()
    }

    /// Load the three independent city snapshots concurrently.
    ///
    /// Best-effort-all: the joint operation completes once every fetch has
    /// settled, and a failure in one is caught at its own call site
    /// without blocking the others.
    pub async fn load_city_data(&self) {
        futures::join!(
            self.load_air_quality(),
            self.load_weather(),
            self.load_traffic(),
        );
    }

    /// Load the pollution history for the trailing `days` window.
    ///
    /// Re-triggered on time-range changes independently of the other
    /// snapshots. A superseding call increments the request generation and
    /// an in-flight result from a superseded call is discarded rather than
    /// overwriting the newer one.
    pub async fn load_pollution_history(&self, days: u32) {
        let generation = self.history_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let history = match self.fetch_history(days).await {
            Ok(points) if !points.is_empty() => points,
            Ok(_) => {
                debug!("no usable measurements, simulating {days} days of history");
                history::simulate(days, &mut rand::thread_rng())
            }
            Err(e) => {
                warn!("pollution history fetch failed: {e}; simulating {days} days");
                history::simulate(days, &mut rand::thread_rng())
            }
        };

        if self.history_generation.load(Ordering::SeqCst) != generation {
            debug!("discarding superseded history load (generation {generation})");
            return;
        }
        self.history.send_replace(history);
    }

    async fn load_air_quality(&self) {
        let snapshot = match &self.credentials.aqicn_token {
            None => air_quality::simulated(),
            Some(token) => match self.fetch_air_quality(token).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!("air quality fetch failed: {e}; keeping previous snapshot");
                    return;
                }
            },
        };
        self.air_quality.send_replace(Some(snapshot));
    }

    async fn load_weather(&self) {
        let snapshot = match &self.credentials.open_weather_key {
            None => weather::simulated(),
            Some(key) => match self.fetch_weather(key).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!("weather fetch failed: {e}; keeping previous snapshot");
                    return;
                }
            },
        };
        self.weather.send_replace(Some(snapshot));
    }

    async fn load_traffic(&self) {
        self.traffic.send_replace(Some(traffic::simulated()));
    }

    async fn fetch_air_quality(&self, token: &str) -> Result<AirQualitySummary> {
        let url = format!(
            "{}/feed/{}/?token={}",
            self.endpoints.air_quality, CITY_SLUG, token
        );
        let body = self.get_text(&url).await?;
        let feed: WaqiFeed = serde_json::from_str(&body)?;
        Ok(air_quality::normalize(feed))
    }

    async fn fetch_weather(&self, key: &str) -> Result<WeatherSummary> {
        let url = format!(
            "{}?q={}&units=metric&appid={}",
            self.endpoints.weather, CITY_QUERY, key
        );
        let body = self.get_text(&url).await?;
        let feed: OwmFeed = serde_json::from_str(&body)?;
        Ok(weather::normalize(feed))
    }

    /// Fetch and aggregate raw measurements for the requested day window.
    ///
    /// Returns an empty vector on any non-error shortfall (no station
    /// found, non-OK response, empty result set); the caller treats empty
    /// as the simulation trigger.
    async fn fetch_history(&self, days: u32) -> Result<Vec<PollutionHistory>> {
        let Some(location_id) = self.locate_station().await? else {
            return Ok(Vec::new());
        };

        let end = Utc::now();
        let start = end - TimeDelta::days(i64::from(days));
        let url = format!(
            "{}?location_id={}&date_from={}&date_to={}&limit=1000&parameter={}",
            self.endpoints.measurements,
            location_id,
            start.to_rfc3339(),
            end.to_rfc3339(),
            history::PARAMETERS.join(","),
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            warn!("measurements feed returned {}", response.status());
            return Ok(Vec::new());
        }

        let feed: MeasurementsFeed = serde_json::from_str(&response.text().await?)?;
        Ok(history::daily_averages(feed.results))
    }

    /// Resolve a monitoring station near the reference coordinate.
    async fn locate_station(&self) -> Result<Option<i64>> {
        let url = format!(
            "{}?coordinates={},{}&radius={}&limit=5",
            self.endpoints.locations, CITY_LAT, CITY_LON, STATION_SEARCH_RADIUS_M
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            warn!("location search returned {}", response.status());
            return Ok(None);
        }

        let feed: LocationsFeed = serde_json::from_str(&response.text().await?)?;
        Ok(feed.results.first().map(|r| r.id))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Ok(response.text().await?)
    }
}
