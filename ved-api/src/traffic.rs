//! Traffic congestion summary.
//!
//! No live source is integrated; the summary is always simulated. It is
//! still exposed through the aggregator as a fetch so a live source can be
//! substituted later without changing the consumer contract.

use serde::{Deserialize, Serialize};

/// One street with its congestion level (0-100, unclamped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficStreet {
    pub name: String,
    pub congestion: f64,
}

/// Aggregate congestion state. Congestion values are stored unclamped and
/// clamped only at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub overall_congestion: f64,
    pub category: String,
    pub streets: Vec<TrafficStreet>,
}

/// Fixed simulated congestion snapshot.
pub fn simulated() -> TrafficSummary {
    TrafficSummary {
        overall_congestion: 73.0,
        category: "High congestion".to_string(),
        streets: vec![
            street("Avenida del Cid", 85.0),
            street("Gran Vía", 68.0),
            street("Blasco Ibáñez", 52.0),
        ],
    }
}

fn street(name: &str, congestion: f64) -> TrafficStreet {
    TrafficStreet {
        name: name.to_string(),
        congestion,
    }
}
