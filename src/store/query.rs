//! Builds the parameterized query for one frequency/reference-date pair.
//!
//! The same [`ObservationQuery`] produces both the SQL statement sent to
//! Postgres and the equivalent Polars predicate used by the in-memory store,
//! so both sources select exactly the same rows.

use crate::types::frequency::{ColumnKind, Frequency};
use crate::types::reference_date::ReferenceDate;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, Expr};
use tokio_postgres::types::ToSql;

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Date(NaiveDate),
    Year(i32),
    /// Lowercase three-letter month code.
    Month(String),
}

impl QueryParam {
    fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            QueryParam::Date(date) => date,
            QueryParam::Year(year) => year,
            QueryParam::Month(month) => month,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservationQuery {
    reference: ReferenceDate,
    sql: String,
    params: Vec<QueryParam>,
}

impl ObservationQuery {
    pub fn new(reference: ReferenceDate) -> Self {
        let frequency = reference.frequency();
        let (predicate, params) = match reference {
            ReferenceDate::Day(date) => ("time::date = $1", vec![QueryParam::Date(date)]),
            ReferenceDate::Month(month) => (
                "year = $1::int4 AND LOWER(month) = LOWER($2::text)",
                vec![
                    QueryParam::Year(month.year()),
                    QueryParam::Month(month.abbreviation().to_string()),
                ],
            ),
            ReferenceDate::Year(year) => ("year = $1::int4", vec![QueryParam::Year(year.get())]),
        };

        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            select_list(frequency),
            frequency.table_name(),
            predicate
        );

        Self {
            reference,
            sql,
            params,
        }
    }

    /// Query for `date` at `frequency`, using only the date components the
    /// frequency needs.
    pub fn for_date(date: NaiveDate, frequency: Frequency) -> Self {
        Self::new(ReferenceDate::for_frequency(frequency, date))
    }

    pub fn reference(&self) -> ReferenceDate {
        self.reference
    }

    pub fn frequency(&self) -> Frequency {
        self.reference.frequency()
    }

    pub fn table_name(&self) -> &'static str {
        self.frequency().table_name()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    pub(crate) fn bind(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(QueryParam::as_sql).collect()
    }

    /// Polars equivalent of the SQL `WHERE` clause, evaluated against the raw
    /// table columns (`time` for daily, `year`/`month` otherwise).
    pub fn predicate(&self) -> Expr {
        match self.reference {
            ReferenceDate::Day(date) => col("time").cast(DataType::Date).eq(lit(date)),
            ReferenceDate::Month(month) => col("year")
                .cast(DataType::Int64)
                .eq(lit(month.year() as i64))
                .and(
                    col("month")
                        .str()
                        .to_lowercase()
                        .eq(lit(month.abbreviation())),
                ),
            ReferenceDate::Year(year) => col("year")
                .cast(DataType::Int64)
                .eq(lit(year.get() as i64)),
        }
    }
}

// Casts in the select list pin the wire types, so decoding does not depend on
// whether the store declares e.g. `real`, `numeric` or `double precision`.
fn select_list(frequency: Frequency) -> String {
    frequency
        .get_schema_columns()
        .iter()
        .map(|(name, kind)| {
            let cast = match kind {
                ColumnKind::Text => "text",
                ColumnKind::Integer => "int8",
                ColumnKind::Float => "float8",
            };
            format!("{name}::{cast} AS {name}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
