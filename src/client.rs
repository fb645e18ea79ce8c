//! Sensor network client and the end-to-end estimation pipeline
//!
//! One invocation is one awaited HTTP round trip: build a bounding box
//! around the reference point, fetch the matching sensors, decode, filter
//! by confidence and distance, calibrate, and aggregate. No retries, no
//! caching, no internal timeouts — resilience belongs to the caller.

use log::{debug, info};

use crate::aggregate::{CalibratedPoint, weighted_estimate};
use crate::aqi::pm25_to_aqi;
use crate::calibration::epa_correct;
use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinate, distance_meters};
use crate::sensors::{FIELDS, SensorPage, decode_rows};

/// Production sensors endpoint root
pub const DEFAULT_BASE_URL: &str = "https://api.purpleair.com/v1";

/// Client configuration, passed in explicitly rather than read from the
/// process environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Read key for the sensor API, sent as the `X-API-Key` header
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint root (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Tuning knobs for one fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Half-width of the query window on each axis, in degrees
    pub margin_degrees: f64,
    /// Reject readings older than this many seconds
    pub max_age_seconds: u32,
    /// Keep only sensors with confidence strictly above this score
    pub min_confidence: u8,
    /// Keep only sensors closer than this to the reference point
    pub max_distance_meters: f64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            margin_degrees: 1.0,
            max_age_seconds: 20 * 60,
            min_confidence: 70,
            max_distance_meters: 10_000.0,
        }
    }
}

/// Client for the PurpleAir sensor network
pub struct SensorClient {
    config: Config,
    client: reqwest::Client,
}

impl SensorClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Distance-weighted PM2.5 estimate at `center`, in µg/m³
    ///
    /// `Ok(None)` means the fetch succeeded but no sensor survived the
    /// confidence/distance filter — "no data", distinct from a transport
    /// failure.
    ///
    /// # Errors
    ///
    /// * `Error::Http` - network failure or undecodable response body
    /// * `Error::Api` - non-success HTTP status from the sensor API
    /// * `Error::MissingColumn` / `Error::InvalidCell` - malformed table
    pub async fn fetch_nearby(
        &self,
        center: Coordinate,
        options: &FetchOptions,
    ) -> Result<Option<f64>> {
        let page = self.fetch_page(center, options).await?;
        let readings = decode_rows(&page)?;
        let total = readings.len();

        let points: Vec<CalibratedPoint> = readings
            .into_iter()
            .filter(|r| {
                r.confidence > options.min_confidence
                    && distance_meters(r.coordinate, center) < options.max_distance_meters
            })
            // Rows without a raw PM2.5 value carry nothing to calibrate.
            .filter_map(|r| {
                r.pm2_5_cf_1.map(|raw| CalibratedPoint {
                    coordinate: r.coordinate,
                    value: epa_correct(raw, r.humidity),
                })
            })
            .collect();

        info!(
            "sensor fetch: {} rows, {} within confidence/distance thresholds",
            total,
            points.len()
        );

        Ok(weighted_estimate(&points, center))
    }

    /// Rounded AQI at `center`
    ///
    /// Composes [`fetch_nearby`](Self::fetch_nearby) with the EPA breakpoint
    /// mapping. `Ok(None)` covers both "no data" and a calibrated
    /// concentration beyond the AQI table.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_nearby`](Self::fetch_nearby).
    pub async fn fetch_aqi(
        &self,
        center: Coordinate,
        options: &FetchOptions,
    ) -> Result<Option<u16>> {
        let estimate = self.fetch_nearby(center, options).await?;
        Ok(estimate
            .and_then(pm25_to_aqi)
            .map(|aqi| aqi.round() as u16))
    }

    async fn fetch_page(&self, center: Coordinate, options: &FetchOptions) -> Result<SensorPage> {
        let bbox = BoundingBox::around(center, options.margin_degrees);
        let url = format!("{}/sensors", self.config.base_url);
        debug!("requesting sensors: {url} around {center:?}");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.config.api_key)
            .query(&[("fields", FIELDS.join(","))])
            .query(&[
                ("nwlng", bbox.nw.longitude),
                ("nwlat", bbox.nw.latitude),
                ("selng", bbox.se.longitude),
                ("selat", bbox.se.latitude),
            ])
            .query(&[("max_age", options.max_age_seconds)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status, body));
        }

        Ok(response.json().await?)
    }
}
