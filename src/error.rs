//! Error types for the sensor query pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching and decoding sensor data
///
/// An empty result set is not an error: the pipeline reports it as
/// `Ok(None)` so callers can render "no data" instead of a failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure or a response body that could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Sensor API answered with a non-success status
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response `fields` list lacks a column we asked for
    #[error("Missing column in response: {0}")]
    MissingColumn(String),

    /// A data cell could not be converted to the expected type
    #[error("Invalid cell value: {0}")]
    InvalidCell(String),
}

impl Error {
    /// Create a new `Api` error from a status code and response body
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a new `InvalidCell` error for a specific field
    #[must_use]
    pub fn invalid_cell(field: &str, value: &serde_json::Value) -> Self {
        Self::InvalidCell(format!("field {field} has unexpected value {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingColumn("confidence".into());
        assert_eq!(err.to_string(), "Missing column in response: confidence");

        let err = Error::api(403, "ApiKeyInvalidError");
        assert_eq!(
            err.to_string(),
            "API returned status 403: ApiKeyInvalidError"
        );

        let err = Error::invalid_cell("latitude", &serde_json::Value::Bool(true));
        assert_eq!(
            err.to_string(),
            "Invalid cell value: field latitude has unexpected value true"
        );
    }
}
