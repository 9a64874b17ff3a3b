//! Data access for the rainfall observation tables.

pub mod error;
pub mod frame;
pub mod memory;
pub mod postgres;
pub mod query;

use crate::types::frequency::Frequency;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::future::Future;

/// A source of observation tables, one per [`Frequency`].
///
/// `query_table` never fails loudly: connection and execution problems are
/// logged by the implementation and surface as `None`. Callers treat `None`
/// and a zero-row frame the same way, as "no data".
pub trait ObservationSource {
    fn query_table(
        &self,
        date: NaiveDate,
        frequency: Frequency,
    ) -> impl Future<Output = Option<DataFrame>>;
}
