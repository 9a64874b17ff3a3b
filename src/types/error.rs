use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid frequency '{0}'. Choose from 'daily', 'monthly', or 'yearly'.")]
    UnknownFrequency(String),

    #[error("Invalid granularity '{0}'. Choose from 'state' or 'district'.")]
    UnknownGranularity(String),

    #[error("Invalid variable '{0}'. Choose from 'rain', 'tmin', or 'tmax'.")]
    UnknownVariable(String),

    #[error("Unrecognized plot type '{0}'")]
    UnknownPlotType(String),

    #[error("Invalid month '{0}', expected a three-letter abbreviation such as 'Jul'")]
    InvalidMonth(String),

    #[error("No calendar date exists for {0}")]
    InvalidDate(String),
}
