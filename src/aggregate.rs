//! Inverse-distance-weighted aggregation of calibrated readings

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, distance_meters};

/// Minimum distance used for weighting, in meters
///
/// A sensor co-located with the reference point would otherwise carry
/// infinite weight and silently eclipse every other reading.
const MIN_DISTANCE_M: f64 = 1.0;

/// A corrected PM2.5 value tied to the sensor's location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibratedPoint {
    pub coordinate: Coordinate,
    /// Calibrated PM2.5 concentration in µg/m³
    pub value: f64,
}

/// Inverse-distance-squared weighted estimate at `reference`
///
/// Standard IDW interpolation with power 2: each point contributes its
/// value with weight 1/d², d being the great-circle distance to the
/// reference (floored at one meter). Returns `None` for an empty input —
/// "no data", never zero.
#[must_use]
pub fn weighted_estimate(points: &[CalibratedPoint], reference: Coordinate) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    let mut value_sum = 0.0;
    let mut weight_sum = 0.0;
    for point in points {
        let distance = distance_meters(reference, point.coordinate).max(MIN_DISTANCE_M);
        let weight = 1.0 / (distance * distance);
        value_sum += weight * point.value;
        weight_sum += weight;
    }

    Some(value_sum / weight_sum)
}
