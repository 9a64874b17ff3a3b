//! Geographic aggregation level of a chart request.

use crate::types::error::SelectionError;
use std::fmt;
use std::str::FromStr;

/// The geographic level a chart is drawn at.
///
/// `State` requests aggregate district rows into one row per state before
/// plotting; `District` requests plot the rows as returned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    State,
    District,
}

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::State, Granularity::District];

    pub fn as_str(&self) -> &'static str {
        self.location_column()
    }

    /// Column of the observation table holding the location name.
    pub fn location_column(&self) -> &'static str {
        match self {
            Granularity::State => "state",
            Granularity::District => "district",
        }
    }

    /// Capitalized label used for axis and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::State => "State",
            Granularity::District => "District",
        }
    }

    /// GeoJSON feature property that carries the location name at this level.
    pub fn join_attribute(&self) -> &'static str {
        match self {
            Granularity::State => "ST_NM",
            Granularity::District => "shapeName",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(Granularity::State),
            "district" => Ok(Granularity::District),
            _ => Err(SelectionError::UnknownGranularity(s.to_string())),
        }
    }
}
