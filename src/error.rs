use crate::chart::error::ChartError;
use crate::geo::error::GeoError;
use crate::store::error::QueryError;
use crate::types::error::SelectionError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
