//! Chart construction from cleaned observation tables.

pub mod choropleth;
pub mod dispatch;
pub mod error;
pub mod figure;
pub mod plots;

pub use dispatch::ChartDispatcher;
pub use error::ChartError;
pub use figure::{Chart, Layout, Trace};
