//! EPA correction for PurpleAir PM2.5 readings
//!
//! Laser particle counters over-read in humid air. The US EPA published a
//! linear correction for PurpleAir channel-1 data:
//! <https://cfpub.epa.gov/si/si_public_record_report.cfm?dirEntryId=349513>

const PM_SLOPE: f64 = 0.534;
const HUMIDITY_SLOPE: f64 = -0.0844;
const INTERCEPT: f64 = 5.604;

/// Humidity substituted when a sensor reports none
pub const DEFAULT_HUMIDITY: f64 = 35.0;

/// Apply the EPA linear correction to a raw PM2.5 concentration (µg/m³)
///
/// `humidity` is relative humidity in percent; `None` falls back to
/// [`DEFAULT_HUMIDITY`]. The result is floored at zero since a physical
/// concentration cannot be negative. Total over finite inputs.
#[must_use]
pub fn epa_correct(raw_pm25: f64, humidity: Option<f64>) -> f64 {
    let humidity = humidity.unwrap_or(DEFAULT_HUMIDITY);
    let corrected = PM_SLOPE * raw_pm25 + HUMIDITY_SLOPE * humidity + INTERCEPT;
    corrected.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[rstest]
    #[case(10.0, Some(35.0), 7.99)] // 5.34 - 2.954 + 5.604
    #[case(10.0, None, 7.99)] // missing humidity behaves like 35%
    #[case(0.0, Some(0.0), 5.604)] // intercept alone
    #[case(0.0, Some(100.0), 0.0)] // would be negative, floored
    #[case(100.0, Some(50.0), 54.784)]
    fn correction_cases(#[case] raw: f64, #[case] humidity: Option<f64>, #[case] expected: f64) {
        let got = epa_correct(raw, humidity);
        assert!(
            (got - expected).abs() < EPS,
            "epa_correct({raw}, {humidity:?}) = {got}, expected {expected}"
        );
    }

    #[test]
    fn never_negative() {
        for raw in [-50.0, 0.0, 1.0, 10.0] {
            for humidity in [0.0, 35.0, 100.0, 163.8] {
                assert!(epa_correct(raw, Some(humidity)) >= 0.0);
            }
        }
    }
}
