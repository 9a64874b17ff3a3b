pub mod chart;
mod config;
mod dashboard;
mod error;
pub mod geo;
mod processing;
pub mod store;
mod types;
mod utils;

pub use config::*;
pub use dashboard::*;
pub use error::RainfallError;

pub use chart::{Chart, ChartDispatcher, ChartError};
pub use geo::{GeoCatalog, GeoError, GeoReference};
pub use processing::{clean_and_aggregate, ObservationFrameExt};

pub use store::error::QueryError;
pub use store::frame::{coerce_observation_types, observations_to_frame};
pub use store::memory::FrameStore;
pub use store::postgres::{RainfallStore, StoreSession, DEFAULT_APPEND_TABLE};
pub use store::query::{ObservationQuery, QueryParam};
pub use store::ObservationSource;

pub use types::error::SelectionError;
pub use types::frequency::Frequency;
pub use types::granularity::Granularity;
pub use types::observation::{Observation, MISSING_SENTINEL};
pub use types::period::{Month, Year};
pub use types::plot_type::PlotType;
pub use types::reference_date::*;
pub use types::variable::Variable;

pub use utils::title_case;
