use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Failed to read boundary file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse boundary file '{0}' as JSON")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Boundary file '{0}' is not a GeoJSON FeatureCollection")]
    NotFeatureCollection(PathBuf),

    #[error("No feature in '{path}' carries the join attribute '{attribute}'")]
    MissingJoinAttribute { path: PathBuf, attribute: String },
}
