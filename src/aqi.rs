//! US EPA AQI breakpoint mapping for PM2.5
//!
//! Converts a (calibrated) PM2.5 concentration into the dimensionless Air
//! Quality Index by piecewise linear interpolation over the published EPA
//! breakpoint table.

/// EPA PM2.5 breakpoints: (concentration low, concentration high,
/// AQI low, AQI high). Concentration bands are lower-inclusive and
/// upper-exclusive, listed in ascending order.
const BREAKPOINTS: [(f64, f64, f64, f64); 7] = [
    (0.0, 12.1, 0.0, 50.0),
    (12.1, 35.5, 51.0, 100.0),
    (35.5, 55.5, 101.0, 150.0),
    (55.5, 150.5, 151.0, 200.0),
    (150.5, 250.5, 201.0, 300.0),
    (250.5, 350.5, 301.0, 400.0),
    (350.5, 500.5, 401.0, 500.0),
];

/// Map a PM2.5 concentration (µg/m³) to its AQI value
///
/// Returns `None` when the concentration is negative, non-finite, or at or
/// above 500.5 µg/m³ — beyond the published table. Callers must surface
/// that as "unavailable" rather than a capped 500.
#[must_use]
pub fn pm25_to_aqi(pm25: f64) -> Option<f64> {
    for (c_lo, c_hi, i_lo, i_hi) in BREAKPOINTS {
        if pm25 >= c_lo && pm25 < c_hi {
            return Some(i_lo + (pm25 - c_lo) / (c_hi - c_lo) * (i_hi - i_lo));
        }
    }
    None
}

/// EPA category name for a (rounded) AQI value
#[must_use]
pub fn aqi_category(aqi: u16) -> &'static str {
    match aqi {
        0..=50 => "Good",
        51..=100 => "Moderate",
        101..=150 => "Unhealthy for Sensitive Groups",
        151..=200 => "Unhealthy",
        201..=300 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

/// EPA display color for a (rounded) AQI value
#[must_use]
pub fn aqi_color(aqi: u16) -> &'static str {
    match aqi {
        0..=50 => "#00E400",
        51..=100 => "#FFFF00",
        101..=150 => "#FF7E00",
        151..=200 => "#FF0000",
        201..=300 => "#8F3F97",
        _ => "#7E0023",
    }
}
