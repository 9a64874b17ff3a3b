use crate::types::error::SelectionError;
use std::fmt;
use std::str::FromStr;

/// A measured quantity that can be shaded on a choropleth map.
///
/// Only the choropleth renderer honors this selection; the other charts always
/// plot `rain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variable {
    /// Rainfall in millimeters.
    #[default]
    Rain,
    /// Minimum temperature in degrees Celsius.
    Tmin,
    /// Maximum temperature in degrees Celsius.
    Tmax,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::Rain, Variable::Tmin, Variable::Tmax];

    pub fn column(&self) -> &'static str {
        match self {
            Variable::Rain => "rain",
            Variable::Tmin => "tmin",
            Variable::Tmax => "tmax",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Rain => "Rain",
            Variable::Tmin => "Tmin",
            Variable::Tmax => "Tmax",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for Variable {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rain" => Ok(Variable::Rain),
            "tmin" => Ok(Variable::Tmin),
            "tmax" => Ok(Variable::Tmax),
            _ => Err(SelectionError::UnknownVariable(s.to_string())),
        }
    }
}
