//! Geospatial heatmap point field for the map heat layer.
//!
//! A fixed table of reference stations carries a relative intensity factor
//! per location. The current PM2.5 value scales every station, with a
//! deterministic positional jitter so a station's reading is reproducible
//! across renders. Extra points are synthesized between close station
//! pairs and on rings around every station purely to densify the rendered
//! field; they carry no additional real data.

use rand::Rng;
use serde::Serialize;
use ved_api::air_quality::AirQualitySummary;

/// PM2.5 concentration assumed when no air quality snapshot is available.
pub const DEFAULT_PM25: f64 = 45.0;

/// Station pairs closer than this (degrees, planar) get interpolated
/// points inserted between them.
const NEIGHBOR_DISTANCE_DEGREES: f64 = 0.025;

/// Random placement offset applied to interpolated points, degrees.
const INTERPOLATION_SCATTER: f64 = 0.002;

const INNER_RING_RADIUS: f64 = 0.008;
const INNER_RING_POINTS: u32 = 6;
const OUTER_RING_RADIUS: f64 = 0.016;
const OUTER_RING_POINTS: u32 = 4;

/// A reference measurement location with its relative intensity factor.
#[derive(Debug, Clone, Copy)]
pub struct Station {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Relative pollution factor: >1 for dense traffic districts, <1
    /// toward the coast.
    pub factor: f64,
}

/// Reference stations across the Valencia districts.
pub static STATIONS: [Station; 18] = [
    Station { name: "Ciutat Vella", lat: 39.474, lng: -0.376, factor: 1.15 },
    Station { name: "Russafa", lat: 39.462, lng: -0.373, factor: 1.20 },
    Station { name: "El Carmen", lat: 39.479, lng: -0.380, factor: 1.10 },
    Station { name: "Extramurs", lat: 39.470, lng: -0.387, factor: 1.05 },
    Station { name: "Campanar", lat: 39.483, lng: -0.397, factor: 0.95 },
    Station { name: "La Saïdia", lat: 39.487, lng: -0.373, factor: 1.00 },
    Station { name: "El Pla del Real", lat: 39.478, lng: -0.362, factor: 0.90 },
    Station { name: "Benimaclet", lat: 39.490, lng: -0.356, factor: 0.85 },
    Station { name: "Algirós", lat: 39.473, lng: -0.348, factor: 0.80 },
    Station { name: "El Cabanyal", lat: 39.468, lng: -0.331, factor: 0.70 },
    Station { name: "Malvarrosa", lat: 39.481, lng: -0.327, factor: 0.65 },
    Station { name: "Poblats Marítims", lat: 39.455, lng: -0.335, factor: 0.75 },
    Station { name: "Quatre Carreres", lat: 39.450, lng: -0.360, factor: 0.95 },
    Station { name: "Jesús", lat: 39.455, lng: -0.385, factor: 1.00 },
    Station { name: "Patraix", lat: 39.458, lng: -0.395, factor: 0.90 },
    Station { name: "L'Olivereta", lat: 39.468, lng: -0.400, factor: 1.05 },
    Station { name: "Benicalap", lat: 39.492, lng: -0.389, factor: 0.88 },
    Station { name: "Rascanya", lat: 39.495, lng: -0.368, factor: 0.92 },
];

/// One geolocated intensity sample; `value` is in PM2.5 units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

/// Current PM2.5 reading from the air quality snapshot, or the default
/// when the snapshot or the reading is absent.
pub fn current_pm25(air_quality: Option<&AirQualitySummary>) -> f64 {
    air_quality
        .and_then(|summary| {
            summary
                .pollutants
                .iter()
                .find(|p| p.name == "PM2.5")
                .map(|p| p.value)
        })
        .unwrap_or(DEFAULT_PM25)
}

/// Deterministic positional jitter in [0.95, 1.05), derived from the
/// coordinates themselves so every render produces the same station value.
pub fn positional_jitter(lat: f64, lng: f64) -> f64 {
    let seed = ((lat * 10_000.0).round() as i64 + (lng * 10_000.0).round() as i64).rem_euclid(10);
    0.95 + seed as f64 / 100.0
}

/// Build the full heatmap field for a PM2.5 concentration.
///
/// The 18 reference stations come first in the output (map markers take
/// the leading slice), followed by interpolated and ring points. Points
/// with non-finite coordinates or non-positive values are dropped.
pub fn build_heatmap(pm25: f64, rng: &mut impl Rng) -> Vec<HeatmapPoint> {
    let stations: Vec<HeatmapPoint> = STATIONS
        .iter()
        .map(|s| HeatmapPoint {
            lat: s.lat,
            lng: s.lng,
            value: pm25 * s.factor * positional_jitter(s.lat, s.lng),
        })
        .collect();

    let mut points = stations.clone();

    // Densify between close station pairs
    for i in 0..stations.len() {
        for j in (i + 1)..stations.len() {
            let (a, b) = (&stations[i], &stations[j]);
            let distance = ((a.lat - b.lat).powi(2) + (a.lng - b.lng).powi(2)).sqrt();
            if distance >= NEIGHBOR_DISTANCE_DEGREES {
                continue;
            }
            let count = rng.gen_range(2..=3);
            for k in 1..=count {
                let t = f64::from(k) / f64::from(count + 1);
                points.push(HeatmapPoint {
                    lat: a.lat
                        + (b.lat - a.lat) * t
                        + rng.gen_range(-INTERPOLATION_SCATTER..INTERPOLATION_SCATTER),
                    lng: a.lng
                        + (b.lng - a.lng) * t
                        + rng.gen_range(-INTERPOLATION_SCATTER..INTERPOLATION_SCATTER),
                    value: (a.value + (b.value - a.value) * t) * rng.gen_range(0.85..1.05),
                });
            }
        }
    }

    // Soft falloff rings around every station
    for station in &stations {
        ring(&mut points, station, INNER_RING_RADIUS, INNER_RING_POINTS, 0.75, 0.95, rng);
        ring(&mut points, station, OUTER_RING_RADIUS, OUTER_RING_POINTS, 0.55, 0.80, rng);
    }

    points.retain(|p| p.lat.is_finite() && p.lng.is_finite() && p.value > 0.0);
    points
}

fn ring(
    points: &mut Vec<HeatmapPoint>,
    center: &HeatmapPoint,
    radius: f64,
    count: u32,
    fade_min: f64,
    fade_max: f64,
    rng: &mut impl Rng,
) {
    for k in 0..count {
        let angle = f64::from(k) / f64::from(count) * std::f64::consts::TAU
            + rng.gen_range(-0.3..0.3);
        points.push(HeatmapPoint {
            lat: center.lat + radius * angle.sin(),
            lng: center.lng + radius * angle.cos(),
            value: center.value * rng.gen_range(fade_min..fade_max),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ved_api::air_quality;

    #[test]
    fn test_current_pm25_from_snapshot() {
        let summary = air_quality::simulated();
        assert_eq!(current_pm25(Some(&summary)), 45.0);
        assert_eq!(current_pm25(None), DEFAULT_PM25);

        let mut without_pm25 = summary;
        without_pm25.pollutants.retain(|p| p.name != "PM2.5");
        assert_eq!(current_pm25(Some(&without_pm25)), DEFAULT_PM25);
    }

    #[test]
    fn test_positional_jitter_reproducible() {
        for station in &STATIONS {
            let jitter = positional_jitter(station.lat, station.lng);
            assert_eq!(jitter, positional_jitter(station.lat, station.lng));
            assert!((0.95..1.05).contains(&jitter));
        }
    }

    #[test]
    fn test_stations_lead_the_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = build_heatmap(45.0, &mut rng);
        assert!(points.len() > STATIONS.len());
        for (point, station) in points.iter().zip(STATIONS.iter()) {
            assert_eq!(point.lat, station.lat);
            assert_eq!(point.lng, station.lng);
        }
    }

    #[test]
    fn test_field_is_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for point in build_heatmap(45.0, &mut rng) {
            assert!(point.lat.is_finite());
            assert!(point.lng.is_finite());
            assert!(point.value > 0.0);
        }
    }

    #[test]
    fn test_field_reproducible_with_seed() {
        let a = build_heatmap(45.0, &mut StdRng::seed_from_u64(9));
        let b = build_heatmap(45.0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rings_synthesized_per_station() {
        let mut rng = StdRng::seed_from_u64(5);
        let points = build_heatmap(45.0, &mut rng);
        let ring_points = STATIONS.len() * (INNER_RING_POINTS + OUTER_RING_POINTS) as usize;
        assert!(points.len() >= STATIONS.len() + ring_points);
    }

    #[test]
    fn test_zero_pm25_yields_empty_field() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(build_heatmap(0.0, &mut rng).is_empty());
    }
}
