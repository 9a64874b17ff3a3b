//! Defines the temporal resolution of a query and the pre-partitioned table
//! that backs each resolution.

use crate::types::error::SelectionError;
use std::fmt;
use std::str::FromStr;

/// The value type a result column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
}

/// Represents the time frequency of rainfall observations.
///
/// Each variant maps to one pre-partitioned table in the store and determines
/// which part of the reference date is used to select rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One row per district per day, selected by exact calendar date.
    Daily,
    /// One row per district per month, selected by year and month abbreviation.
    Monthly,
    /// One row per district per year, selected by year.
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Monthly, Frequency::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Name of the table holding observations at this frequency.
    pub fn table_name(&self) -> &'static str {
        match self {
            Frequency::Daily => "rainfall_data_partitioned_districts",
            Frequency::Monthly => "rainfall_data_partitioned_districts_monthly",
            Frequency::Yearly => "rainfall_data_partitioned_districts_yearly",
        }
    }

    /// Columns returned by a query at this frequency, in result order.
    pub(crate) fn get_schema_columns(&self) -> &'static [(&'static str, ColumnKind)] {
        use ColumnKind::{Float, Integer, Text};
        match self {
            Frequency::Daily => &[
                ("state", Text),
                ("district", Text),
                ("rain", Float),
                ("tmin", Float),
                ("tmax", Float),
            ],
            Frequency::Monthly => &[
                ("state", Text),
                ("district", Text),
                ("year", Integer),
                ("month", Text),
                ("rain", Float),
                ("tmin", Float),
                ("tmax", Float),
            ],
            Frequency::Yearly => &[
                ("state", Text),
                ("district", Text),
                ("year", Integer),
                ("rain", Float),
                ("tmin", Float),
                ("tmax", Float),
            ],
        }
    }

    pub(crate) fn get_schema_column_names(&self) -> Vec<&'static str> {
        self.get_schema_columns()
            .iter()
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Allows formatting a `Frequency` variant using its lowercase name.
///
/// # Examples
///
/// ```
/// use rainfall_climate::Frequency;
///
/// assert_eq!(Frequency::Monthly.to_string(), "monthly");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses the user-facing frequency name.
///
/// An unknown name is a caller bug and is reported as
/// [`SelectionError::UnknownFrequency`] rather than being mapped to a default.
impl FromStr for Frequency {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(SelectionError::UnknownFrequency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() -> Result<(), SelectionError> {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.as_str().parse::<Frequency>()?, frequency);
        }
        assert_eq!("Monthly".parse::<Frequency>()?, Frequency::Monthly);
        Ok(())
    }

    #[test]
    fn test_unknown_frequency_is_an_error() {
        let err = "weekly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, SelectionError::UnknownFrequency(ref s) if s == "weekly"));
    }

    #[test]
    fn test_schema_columns() {
        assert_eq!(
            Frequency::Daily.get_schema_column_names(),
            ["state", "district", "rain", "tmin", "tmax"]
        );
        assert_eq!(
            Frequency::Monthly.get_schema_column_names(),
            ["state", "district", "year", "month", "rain", "tmin", "tmax"]
        );
        assert_eq!(
            Frequency::Yearly.get_schema_column_names(),
            ["state", "district", "year", "rain", "tmin", "tmax"]
        );
    }
}
