//! PurpleAir sensor response decoding
//!
//! The sensors endpoint returns a column-oriented table: a `fields` array
//! naming the columns and a `data` array of rows positionally aligned to
//! it. The column order belongs to the response — it follows whatever
//! field set was requested — so every page gets its own name→index map
//! instead of a fixed layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Field set requested from the sensor API
pub const FIELDS: [&str; 8] = [
    "name",
    "sensor_index",
    "latitude",
    "longitude",
    "confidence",
    "humidity",
    "pm2.5_cf_1",
    "pm2.5_10minute",
];

/// Raw response page from the sensors endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SensorPage {
    /// Column names, in the order the rows are laid out
    pub fields: Vec<String>,
    /// One row per sensor, cells positionally aligned to `fields`
    pub data: Vec<Vec<Value>>,
}

/// One decoded sensor row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// Sensor identifier in the upstream network
    pub sensor_index: u64,
    /// Display name the owner gave the device
    pub name: String,
    pub coordinate: Coordinate,
    /// Data-quality score, 0–100
    pub confidence: u8,
    /// Relative humidity in %, absent on sensors without the sensor board
    pub humidity: Option<f64>,
    /// Raw channel-1 PM2.5 concentration in µg/m³
    pub pm2_5_cf_1: Option<f64>,
    /// 10-minute smoothed PM2.5, secondary signal only
    pub pm2_5_10minute: Option<f64>,
}

/// Resolved column positions for one response page
struct ColumnIndex {
    name: usize,
    sensor_index: usize,
    latitude: usize,
    longitude: usize,
    confidence: usize,
    humidity: usize,
    pm2_5_cf_1: usize,
    pm2_5_10minute: usize,
}

impl ColumnIndex {
    fn resolve(fields: &[String]) -> Result<Self> {
        let col = |name: &str| -> Result<usize> {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };

        Ok(Self {
            name: col("name")?,
            sensor_index: col("sensor_index")?,
            latitude: col("latitude")?,
            longitude: col("longitude")?,
            confidence: col("confidence")?,
            humidity: col("humidity")?,
            pm2_5_cf_1: col("pm2.5_cf_1")?,
            pm2_5_10minute: col("pm2.5_10minute")?,
        })
    }
}

/// Decode all rows of a response page into structured readings
///
/// # Errors
///
/// * `Error::MissingColumn` - a requested column is absent from `fields`
/// * `Error::InvalidCell` - a cell has the wrong type for its column
pub fn decode_rows(page: &SensorPage) -> Result<Vec<SensorReading>> {
    let cols = ColumnIndex::resolve(&page.fields)?;
    page.data.iter().map(|row| decode_row(row, &cols)).collect()
}

fn decode_row(row: &[Value], cols: &ColumnIndex) -> Result<SensorReading> {
    Ok(SensorReading {
        sensor_index: cell_u64("sensor_index", cell(row, cols.sensor_index))?,
        name: cell_string("name", cell(row, cols.name))?,
        coordinate: Coordinate::new(
            cell_f64("latitude", cell(row, cols.latitude))?,
            cell_f64("longitude", cell(row, cols.longitude))?,
        ),
        confidence: cell_confidence(cell(row, cols.confidence))?,
        humidity: cell_opt_f64("humidity", cell(row, cols.humidity))?,
        pm2_5_cf_1: cell_opt_f64("pm2.5_cf_1", cell(row, cols.pm2_5_cf_1))?,
        pm2_5_10minute: cell_opt_f64("pm2.5_10minute", cell(row, cols.pm2_5_10minute))?,
    })
}

/// Fetch a cell; short rows read as null
fn cell(row: &[Value], index: usize) -> &Value {
    static NULL: Value = Value::Null;
    row.get(index).unwrap_or(&NULL)
}

/// Decode a required numeric cell
///
/// Cells arrive as JSON numbers or, on some gateway versions, numeric
/// strings; both are accepted.
fn cell_f64(field: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| Error::invalid_cell(field, value)),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| Error::invalid_cell(field, value)),
        _ => Err(Error::invalid_cell(field, value)),
    }
}

/// Decode an optional numeric cell; null means "not reported"
fn cell_opt_f64(field: &str, value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        other => cell_f64(field, other).map(Some),
    }
}

fn cell_u64(field: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| Error::invalid_cell(field, value)),
        Value::String(s) => s
            .parse::<u64>()
            .map_err(|_| Error::invalid_cell(field, value)),
        _ => Err(Error::invalid_cell(field, value)),
    }
}

fn cell_string(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(Error::invalid_cell(field, value)),
    }
}

/// Confidence is declared as a 0–100 integer
fn cell_confidence(value: &Value) -> Result<u8> {
    let raw = cell_u64("confidence", value)?;
    u8::try_from(raw)
        .ok()
        .filter(|c| *c <= 100)
        .ok_or_else(|| Error::invalid_cell("confidence", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn page(fields: &[&str], data: Value) -> SensorPage {
        SensorPage {
            fields: fields.iter().map(ToString::to_string).collect(),
            data: serde_json::from_value(data).unwrap(),
        }
    }

    #[test]
    fn decodes_rows_by_declared_column_order() {
        // Same row content, two different column layouts.
        let a = page(
            &FIELDS,
            json!([["Backyard", 1234, 45.5, -122.6, 95, 40.0, 8.2, 7.9]]),
        );
        let b = page(
            &[
                "confidence",
                "pm2.5_cf_1",
                "name",
                "latitude",
                "longitude",
                "sensor_index",
                "humidity",
                "pm2.5_10minute",
            ],
            json!([[95, 8.2, "Backyard", 45.5, -122.6, 1234, 40.0, 7.9]]),
        );

        let rows_a = decode_rows(&a).unwrap();
        let rows_b = decode_rows(&b).unwrap();
        assert_eq!(rows_a, rows_b);

        let reading = &rows_a[0];
        assert_eq!(reading.sensor_index, 1234);
        assert_eq!(reading.name, "Backyard");
        assert_eq!(reading.coordinate, Coordinate::new(45.5, -122.6));
        assert_eq!(reading.confidence, 95);
        assert_eq!(reading.humidity, Some(40.0));
        assert_eq!(reading.pm2_5_cf_1, Some(8.2));
    }

    #[test]
    fn accepts_numeric_strings_and_null_cells() {
        let p = page(
            &FIELDS,
            json!([["Porch", "77", "45.5", "-122.6", 88, null, "8.2", null]]),
        );
        let rows = decode_rows(&p).unwrap();
        assert_eq!(rows[0].sensor_index, 77);
        assert_eq!(rows[0].coordinate.latitude, 45.5);
        assert_eq!(rows[0].humidity, None);
        assert_eq!(rows[0].pm2_5_cf_1, Some(8.2));
        assert_eq!(rows[0].pm2_5_10minute, None);
    }

    #[test]
    fn short_rows_read_missing_cells_as_null() {
        let p = page(&FIELDS, json!([["Attic", 5, 45.5, -122.6, 90, 30.0, 8.2]]));
        let rows = decode_rows(&p).unwrap();
        assert_eq!(rows[0].pm2_5_10minute, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let p = page(&["name", "sensor_index"], json!([["Backyard", 1234]]));
        assert!(matches!(
            decode_rows(&p),
            Err(Error::MissingColumn(field)) if field == "latitude"
        ));
    }

    #[rstest]
    #[case(json!([["Backyard", 1234, true, -122.6, 95, null, 8.2, null]]))] // bool latitude
    #[case(json!([["Backyard", 1234, 45.5, -122.6, 150, null, 8.2, null]]))] // confidence > 100
    #[case(json!([["Backyard", 1234, 45.5, -122.6, "high", null, 8.2, null]]))]
    #[case(json!([[7, 1234, 45.5, -122.6, 95, null, 8.2, null]]))] // numeric name
    fn invalid_cells_are_errors(#[case] data: Value) {
        let p = page(&FIELDS, data);
        assert!(matches!(decode_rows(&p), Err(Error::InvalidCell(_))));
    }
}
