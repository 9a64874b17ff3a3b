use crate::geo::error::GeoError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Required column '{0}' not found in DataFrame")]
    MissingColumn(String, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to load boundaries for the map")]
    Geo(#[from] GeoError),

    #[error("Failed to serialize chart")]
    Serialize(#[from] serde_json::Error),
}
