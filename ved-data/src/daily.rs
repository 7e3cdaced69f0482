//! Labeled daily chart series for the 7-day and 30-day views.

use log::warn;
use serde::Serialize;
use ved_api::history::PollutionHistory;
use ved_utils::dates;

/// One labeled daily chart sample; pollutant values pass through from the
/// history point unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySample {
    /// Short "DD Mon" label
    pub label: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
}

impl DailySample {
    /// Combined display value used by the single-series bar chart.
    pub fn combined(&self) -> f64 {
        (self.pm25 + self.pm10 + self.no2) / 3.0
    }
}

/// Take the trailing `days` history points and label each with its short
/// date. Points with unparseable dates keep the raw date string as label.
pub fn daily_breakdown(history: &[PollutionHistory], days: usize) -> Vec<DailySample> {
    let start = history.len().saturating_sub(days);
    history[start..]
        .iter()
        .map(|point| DailySample {
            label: dates::parse_date(&point.date)
                .map(|d| dates::chart_label(&d))
                .unwrap_or_else(|_| {
                    warn!("unparseable history date {:?}, using it as label", point.date);
                    point.date.clone()
                }),
            pm25: point.pm25,
            pm10: point.pm10,
            no2: point.no2,
        })
        .collect()
}
