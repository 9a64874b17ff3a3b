//! An in-memory observation source backed by Polars frames.

use crate::store::error::QueryError;
use crate::store::frame::coerce_observation_types;
use crate::store::query::ObservationQuery;
use crate::store::ObservationSource;
use crate::types::frequency::Frequency;
use chrono::NaiveDate;
use log::{error, info};
use polars::prelude::*;
use std::collections::HashMap;

/// Serves observation queries from frames held in memory.
///
/// Each registered frame plays the role of one pre-partitioned table and must
/// have that table's raw columns (`time` for daily data, `year`/`month` for
/// monthly data, `year` for yearly data, plus `state`, `district`, `rain`,
/// `tmin`, `tmax`). Queries apply the same predicates as the SQL statements,
/// including the case-insensitive month comparison.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use rainfall_climate::{FrameStore, Frequency};
///
/// let yearly = df!(
///     "year" => [2020i32, 2021],
///     "state" => ["Goa", "Goa"],
///     "district" => ["North Goa", "North Goa"],
///     "rain" => [3000.0, 2800.0],
///     "tmin" => [22.0, 22.5],
///     "tmax" => [32.0, 31.5],
/// ).unwrap();
///
/// let store = FrameStore::new().with_table(Frequency::Yearly, yearly);
/// let date = chrono::NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// let result = store.try_query_table(date, Frequency::Yearly).unwrap();
/// assert_eq!(result.height(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    tables: HashMap<Frequency, DataFrame>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `frame` as the table for `frequency`, replacing any earlier one.
    pub fn with_table(mut self, frequency: Frequency, frame: DataFrame) -> Self {
        self.tables.insert(frequency, frame);
        self
    }

    pub fn try_query_table(
        &self,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Result<DataFrame, QueryError> {
        let query = ObservationQuery::for_date(date, frequency);
        let table = self
            .tables
            .get(&frequency)
            .ok_or_else(|| QueryError::MissingTable(query.table_name().to_string()))?;

        let selection: Vec<Expr> = frequency
            .get_schema_column_names()
            .into_iter()
            .map(col)
            .collect();
        let frame = table
            .clone()
            .lazy()
            .filter(query.predicate())
            .select(selection)
            .collect()
            .map_err(QueryError::Frame)?;

        info!(
            "Query on in-memory {} for {} returned {} rows",
            query.table_name(),
            query.reference(),
            frame.height()
        );
        coerce_observation_types(frame).map_err(QueryError::Frame)
    }
}

impl ObservationSource for FrameStore {
    async fn query_table(&self, date: NaiveDate, frequency: Frequency) -> Option<DataFrame> {
        match self.try_query_table(date, frequency) {
            Ok(frame) => Some(frame),
            Err(e) => {
                error!("An error occurred while querying data: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::frame::observations_to_frame;
    use crate::types::observation::Observation;
    use chrono::NaiveDateTime;

    fn observation(state: &str, district: &str) -> Observation {
        Observation {
            time: None,
            state: state.to_string(),
            district: Some(district.to_string()),
            year: None,
            month: None,
            rain: 10.0,
            tmin: 20.0,
            tmax: 30.0,
        }
    }

    fn monthly_store() -> Result<FrameStore, PolarsError> {
        let months = [("jul", 2021), ("Jul", 2021), ("JUL", 2021), ("aug", 2021), ("jul", 2020)];
        let observations: Vec<Observation> = months
            .iter()
            .enumerate()
            .map(|(i, (month, year))| Observation {
                year: Some(*year),
                month: Some(month.to_string()),
                ..observation("KERALA", &format!("D{i}"))
            })
            .collect();
        Ok(FrameStore::new().with_table(
            Frequency::Monthly,
            observations_to_frame(Frequency::Monthly, &observations)?,
        ))
    }

    #[test]
    fn test_monthly_match_ignores_case() -> Result<(), Box<dyn std::error::Error>> {
        let store = monthly_store()?;
        let date = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();

        let df = store.try_query_table(date, Frequency::Monthly)?;

        assert_eq!(df.height(), 3);
        let districts: Vec<Option<&str>> = df.column("district")?.str()?.into_iter().collect();
        assert_eq!(districts, [Some("D0"), Some("D1"), Some("D2")]);
        assert_eq!(
            df.get_column_names(),
            ["state", "district", "year", "month", "rain", "tmin", "tmax"]
        );
        Ok(())
    }

    #[test]
    fn test_yearly_query_returns_integer_years() -> Result<(), Box<dyn std::error::Error>> {
        let observations: Vec<Observation> = [2019, 2020, 2020, 2021]
            .iter()
            .map(|year| Observation {
                year: Some(*year),
                ..observation("GOA", "NORTH GOA")
            })
            .collect();
        let raw = observations_to_frame(Frequency::Yearly, &observations)?;
        assert_eq!(raw.column("year")?.dtype(), &DataType::Int32);

        let store = FrameStore::new().with_table(Frequency::Yearly, raw);
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let df = store.try_query_table(date, Frequency::Yearly)?;

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("year")?.dtype(), &DataType::Int64);
        assert!(df.column("year")?.i64()?.into_iter().all(|y| y == Some(2020)));
        Ok(())
    }

    #[test]
    fn test_daily_query_matches_date_portion() -> Result<(), Box<dyn std::error::Error>> {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok();
        let observations = vec![
            Observation { time: at("2023-01-01 00:00:00"), ..observation("GOA", "A") },
            Observation { time: at("2023-01-01 18:30:00"), ..observation("GOA", "B") },
            Observation { time: at("2023-01-02 00:00:00"), ..observation("GOA", "C") },
        ];
        let store = FrameStore::new().with_table(
            Frequency::Daily,
            observations_to_frame(Frequency::Daily, &observations)?,
        );
        let df = store.try_query_table(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), Frequency::Daily)?;

        assert_eq!(df.height(), 2);
        assert!(df.column("time").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_table_yields_no_data() {
        let store = FrameStore::new();
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        assert!(matches!(
            store.try_query_table(date, Frequency::Daily),
            Err(QueryError::MissingTable(_))
        ));
        assert!(store.query_table(date, Frequency::Daily).await.is_none());
    }
}
