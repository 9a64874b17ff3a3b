//! Boundary geometries for the choropleth map.

pub mod catalog;
pub mod error;
pub mod reference;

pub use catalog::GeoCatalog;
pub use error::GeoError;
pub use reference::GeoReference;
