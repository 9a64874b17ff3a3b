//! Cleaning and aggregation of raw observation frames.

pub mod cleaning;

pub use cleaning::{clean_and_aggregate, ObservationFrameExt};
