//! PM2.5 intensity normalization and qualitative level classification.
//!
//! Both scales share the same six breakpoints so the heat layer gradient
//! and the qualitative labels stay visually consistent.

/// AQI band breakpoints for PM2.5, µg/m³.
pub const BREAKPOINT_GOOD: f64 = 12.0;
pub const BREAKPOINT_MODERATE: f64 = 35.4;
pub const BREAKPOINT_UNHEALTHY_SENSITIVE: f64 = 55.4;
pub const BREAKPOINT_UNHEALTHY: f64 = 150.4;
pub const BREAKPOINT_VERY_UNHEALTHY: f64 = 250.4;
pub const BREAKPOINT_HAZARDOUS_CEILING: f64 = 500.0;

/// Qualitative air quality level with its display color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityLevel {
    pub label: &'static str,
    pub color: &'static str,
}

/// Map a PM2.5 concentration to a [0, 1] heat intensity.
///
/// Piecewise linear over the AQI band breakpoints; each band maps to a
/// fixed sub-range of [0, 1] and values above the top breakpoint clamp
/// to 1.0.
pub fn normalize_intensity(pm25: f64) -> f64 {
    if pm25 <= BREAKPOINT_GOOD {
        pm25 / BREAKPOINT_GOOD * 0.2
    } else if pm25 <= BREAKPOINT_MODERATE {
        0.2 + (pm25 - BREAKPOINT_GOOD) / (BREAKPOINT_MODERATE - BREAKPOINT_GOOD) * 0.2
    } else if pm25 <= BREAKPOINT_UNHEALTHY_SENSITIVE {
        0.4 + (pm25 - BREAKPOINT_MODERATE)
            / (BREAKPOINT_UNHEALTHY_SENSITIVE - BREAKPOINT_MODERATE)
            * 0.2
    } else if pm25 <= BREAKPOINT_UNHEALTHY {
        0.6 + (pm25 - BREAKPOINT_UNHEALTHY_SENSITIVE)
            / (BREAKPOINT_UNHEALTHY - BREAKPOINT_UNHEALTHY_SENSITIVE)
            * 0.2
    } else if pm25 <= BREAKPOINT_VERY_UNHEALTHY {
        0.8 + (pm25 - BREAKPOINT_UNHEALTHY) / (BREAKPOINT_VERY_UNHEALTHY - BREAKPOINT_UNHEALTHY)
            * 0.1
    } else {
        (0.9 + (pm25 - BREAKPOINT_VERY_UNHEALTHY)
            / (BREAKPOINT_HAZARDOUS_CEILING - BREAKPOINT_VERY_UNHEALTHY)
            * 0.1)
            .min(1.0)
    }
}

/// Classify a PM2.5 concentration into its qualitative level.
pub fn classify(pm25: f64) -> AirQualityLevel {
    if pm25 <= BREAKPOINT_GOOD {
        AirQualityLevel { label: "Good", color: "#00ff00" }
    } else if pm25 <= BREAKPOINT_MODERATE {
        AirQualityLevel { label: "Moderate", color: "#ffff00" }
    } else if pm25 <= BREAKPOINT_UNHEALTHY_SENSITIVE {
        AirQualityLevel { label: "Unhealthy for sensitive groups", color: "#ff9900" }
    } else if pm25 <= BREAKPOINT_UNHEALTHY {
        AirQualityLevel { label: "Unhealthy", color: "#ff0000" }
    } else if pm25 <= BREAKPOINT_VERY_UNHEALTHY {
        AirQualityLevel { label: "Very unhealthy", color: "#990099" }
    } else {
        AirQualityLevel { label: "Hazardous", color: "#660000" }
    }
}
