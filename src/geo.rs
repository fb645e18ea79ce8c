//! Geographic primitives: coordinates, great-circle distance, bounding boxes

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical model)
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on Earth in decimal degrees
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; values
/// outside those ranges are not validated and propagate as numerically
/// meaningless distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in meters
///
/// Haversine formula on a spherical Earth. Accurate to a few meters at the
/// sub-50 km scale the sensor pipeline operates on. Symmetric, non-negative,
/// and zero for identical inputs.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Axis-aligned query window around a center point
///
/// Corners follow the sensor API convention: northwest has the larger
/// latitude and smaller longitude. Antimeridian wraparound and polar
/// clamping are not handled; boxes near ±180° longitude or the poles are
/// a known limitation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub nw: Coordinate,
    pub se: Coordinate,
}

impl BoundingBox {
    /// Build a box by adding/subtracting `margin_degrees` on each axis
    #[must_use]
    pub fn around(center: Coordinate, margin_degrees: f64) -> Self {
        Self {
            nw: Coordinate::new(
                center.latitude + margin_degrees,
                center.longitude - margin_degrees,
            ),
            se: Coordinate::new(
                center.latitude - margin_degrees,
                center.longitude + margin_degrees,
            ),
        }
    }
}
