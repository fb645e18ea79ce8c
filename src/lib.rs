//! Local PM2.5 AQI estimation
//!
//! This crate answers "what's my air quality right now" from the PurpleAir
//! sensor network: it queries a bounding box around a reference coordinate,
//! filters the returned sensors by confidence and distance, applies the EPA
//! humidity correction to each raw PM2.5 reading, interpolates an
//! inverse-distance-weighted estimate at the reference point, and maps it
//! through the EPA AQI breakpoint table.
//!
//! # Example
//!
//! ```rust,no_run
//! use local_aqi::{Config, Coordinate, FetchOptions, SensorClient};
//!
//! # async fn run() -> local_aqi::Result<()> {
//! let client = SensorClient::new(Config::new("YOUR-READ-KEY"));
//! let home = Coordinate::new(45.5152, -122.6784);
//!
//! match client.fetch_aqi(home, &FetchOptions::default()).await? {
//!     Some(aqi) => println!("AQI {aqi} ({})", local_aqi::aqi_category(aqi)),
//!     None => println!("no sensor data nearby"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! "No data" (no sensors survive the filter, or the concentration falls
//! outside the AQI table) is `Ok(None)`, never an error and never a zero.

pub mod aggregate;
pub mod aqi;
pub mod calibration;
pub mod client;
pub mod error;
pub mod geo;
pub mod sensors;

pub use aggregate::{CalibratedPoint, weighted_estimate};
pub use aqi::{aqi_category, aqi_color, pm25_to_aqi};
pub use calibration::epa_correct;
pub use client::{Config, FetchOptions, SensorClient};
pub use error::{Error, Result};
pub use geo::{BoundingBox, Coordinate, distance_meters};
pub use sensors::{SensorPage, SensorReading, decode_rows};
