//! Derived projections for charts and the map heat layer.
//!
//! This crate transforms published snapshots into presentation-ready
//! series: a synthesized intraday breakdown, labeled daily chart samples,
//! a geospatial heatmap point field, the intensity/level scales, and gauge
//! display helpers. Everything here is a pure function over snapshot
//! records; nothing fetches.

pub mod daily;
pub mod gauge;
pub mod heatmap;
pub mod hourly;
pub mod level;
