use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Value the store uses for a missing measurement.
pub const MISSING_SENTINEL: f64 = -999.0;

/// Represents one row of an observation table.
///
/// Which optional fields are meaningful depends on the table: `time` is set for
/// daily rows, `year` for monthly and yearly rows, and `month` (a lowercase
/// three-letter code) for monthly rows only. Measurements equal to
/// [`MISSING_SENTINEL`] mean "no observation".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: Option<NaiveDateTime>,
    pub state: String,
    pub district: Option<String>,
    pub year: Option<i32>,
    pub month: Option<String>,
    /// Rainfall in millimeters.
    pub rain: f64,
    /// Minimum temperature in degrees Celsius.
    pub tmin: f64,
    /// Maximum temperature in degrees Celsius.
    pub tmax: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_survives_deserialization() -> Result<(), serde_json::Error> {
        let row: Observation = serde_json::from_str(
            r#"{"time": null, "state": "GOA", "district": "NORTH GOA", "year": 2020,
                "month": "jul", "rain": 12.0, "tmin": -999.0, "tmax": 31.0}"#,
        )?;

        assert_eq!(row.tmin, MISSING_SENTINEL);
        assert_eq!(row.month.as_deref(), Some("jul"));
        assert_eq!(row.time, None);
        Ok(())
    }
}
