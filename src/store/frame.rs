//! Conversion between store rows, observation records and Polars frames.

use crate::store::error::QueryError;
use crate::types::frequency::{ColumnKind, Frequency};
use crate::types::observation::Observation;
use polars::prelude::*;
use tokio_postgres::Row;

const MEASUREMENT_COLUMNS: [&str; 3] = ["rain", "tmin", "tmax"];

/// Typed, positional access to one result row.
pub(crate) trait RowAccess {
    fn text(&self, idx: usize) -> Result<Option<String>, QueryError>;
    fn integer(&self, idx: usize) -> Result<Option<i64>, QueryError>;
    fn float(&self, idx: usize) -> Result<Option<f64>, QueryError>;
}

fn decode_error(row: &Row, idx: usize, source: tokio_postgres::Error) -> QueryError {
    QueryError::Decode {
        column: row
            .columns()
            .get(idx)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| format!("#{idx}")),
        source,
    }
}

impl RowAccess for Row {
    fn text(&self, idx: usize) -> Result<Option<String>, QueryError> {
        self.try_get::<_, Option<String>>(idx)
            .map_err(|e| decode_error(self, idx, e))
    }

    fn integer(&self, idx: usize) -> Result<Option<i64>, QueryError> {
        self.try_get::<_, Option<i64>>(idx)
            .map_err(|e| decode_error(self, idx, e))
    }

    fn float(&self, idx: usize) -> Result<Option<f64>, QueryError> {
        self.try_get::<_, Option<f64>>(idx)
            .map_err(|e| decode_error(self, idx, e))
    }
}

/// Builds a frame with the result schema of `frequency` from query rows.
///
/// Zero rows produce a zero-height frame that still has every column.
pub(crate) fn rows_to_frame<R: RowAccess>(
    rows: &[R],
    frequency: Frequency,
) -> Result<DataFrame, QueryError> {
    let mut columns = Vec::with_capacity(frequency.get_schema_columns().len());
    for (idx, (name, kind)) in frequency.get_schema_columns().iter().enumerate() {
        let name = PlSmallStr::from_static(*name);
        let column = match kind {
            ColumnKind::Text => Column::new(
                name,
                rows.iter()
                    .map(|row| row.text(idx))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ColumnKind::Integer => Column::new(
                name,
                rows.iter()
                    .map(|row| row.integer(idx))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ColumnKind::Float => Column::new(
                name,
                rows.iter()
                    .map(|row| row.float(idx))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };
        columns.push(column);
    }

    let frame = DataFrame::new(columns).map_err(QueryError::Frame)?;
    coerce_observation_types(frame).map_err(QueryError::Frame)
}

/// Casts `year` to Int64 and `rain`/`tmin`/`tmax` to Float64 where present.
///
/// Columns that are absent are left absent; every other column is untouched.
pub fn coerce_observation_types(frame: DataFrame) -> PolarsResult<DataFrame> {
    let mut casts = Vec::new();
    if frame.column("year").is_ok() {
        casts.push(col("year").cast(DataType::Int64));
    }
    for name in MEASUREMENT_COLUMNS {
        if frame.column(name).is_ok() {
            casts.push(col(name).cast(DataType::Float64));
        }
    }

    if casts.is_empty() {
        return Ok(frame);
    }
    frame.lazy().with_columns(casts).collect()
}

/// Lays out observation records the way the `frequency` table stores them.
///
/// Daily tables get a millisecond `time` timestamp, monthly tables get
/// `year` (Int32) and `month`, yearly tables get `year`. The result is the raw
/// table shape, before any query selects or coerces columns.
pub fn observations_to_frame(
    frequency: Frequency,
    observations: &[Observation],
) -> PolarsResult<DataFrame> {
    let mut columns = Vec::new();

    match frequency {
        Frequency::Daily => {
            let millis: Vec<Option<i64>> = observations
                .iter()
                .map(|o| o.time.map(|t| t.and_utc().timestamp_millis()))
                .collect();
            columns.push(
                Column::new("time".into(), millis)
                    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
            );
        }
        Frequency::Monthly | Frequency::Yearly => {
            let years: Vec<Option<i32>> = observations.iter().map(|o| o.year).collect();
            columns.push(Column::new("year".into(), years));
            if frequency == Frequency::Monthly {
                let months: Vec<Option<String>> =
                    observations.iter().map(|o| o.month.clone()).collect();
                columns.push(Column::new("month".into(), months));
            }
        }
    }

    let states: Vec<String> = observations.iter().map(|o| o.state.clone()).collect();
    let districts: Vec<Option<String>> = observations.iter().map(|o| o.district.clone()).collect();
    let rain: Vec<f64> = observations.iter().map(|o| o.rain).collect();
    let tmin: Vec<f64> = observations.iter().map(|o| o.tmin).collect();
    let tmax: Vec<f64> = observations.iter().map(|o| o.tmax).collect();

    columns.push(Column::new("state".into(), states));
    columns.push(Column::new("district".into(), districts));
    columns.push(Column::new("rain".into(), rain));
    columns.push(Column::new("tmin".into(), tmin));
    columns.push(Column::new("tmax".into(), tmax));

    DataFrame::new(columns)
}
