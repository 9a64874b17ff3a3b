use crate::types::granularity::Granularity;
use crate::types::observation::MISSING_SENTINEL;
use polars::prelude::{col, lit, DataFrame, IntoLazy, LazyFrame, PolarsResult, SortMultipleOptions};

const MEASUREMENT_COLUMNS: [&str; 3] = ["rain", "tmin", "tmax"];

pub trait ObservationFrameExt {
    /// Drops every row in which `rain`, `tmin` or `tmax` equals the missing
    /// sentinel (-999).
    ///
    /// A row is dropped when *any* of the three columns carries the sentinel,
    /// whichever variable is plotted afterwards. Null values are not the
    /// sentinel and are kept.
    fn drop_sentinel_rows(self) -> LazyFrame;

    /// Collapses rows to one per location at `granularity`.
    ///
    /// For [`Granularity::State`] rows are grouped by `state` and each of
    /// `rain`, `tmin`, `tmax` becomes the arithmetic mean of the group, with
    /// empty means replaced by 0.0. Rows without a state are discarded and the
    /// result is ordered by state. Other columns, including `district`, do not
    /// survive the aggregation.
    ///
    /// For [`Granularity::District`] the frame is returned unchanged.
    fn aggregate_to(self, granularity: Granularity) -> LazyFrame;
}

impl ObservationFrameExt for LazyFrame {
    fn drop_sentinel_rows(self) -> LazyFrame {
        let [rain, tmin, tmax] =
            MEASUREMENT_COLUMNS.map(|name| col(name).neq_missing(lit(MISSING_SENTINEL)));
        self.filter(rain.and(tmin).and(tmax))
    }

    fn aggregate_to(self, granularity: Granularity) -> LazyFrame {
        match granularity {
            Granularity::District => self,
            Granularity::State => self
                .filter(col("state").is_not_null())
                .group_by([col("state")])
                .agg(MEASUREMENT_COLUMNS.map(|name| col(name).mean()))
                .with_columns(MEASUREMENT_COLUMNS.map(|name| col(name).fill_null(lit(0.0))))
                .sort_by_exprs([col("state")], SortMultipleOptions::default()),
        }
    }
}

/// Removes sentinel rows from `frame` and aggregates it to `granularity`.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use rainfall_climate::{clean_and_aggregate, Granularity};
///
/// let df = df!(
///     "state" => ["Goa", "Goa", "Kerala"],
///     "district" => ["North Goa", "South Goa", "Idukki"],
///     "rain" => [10.0, 20.0, -999.0],
///     "tmin" => [20.0, 22.0, 18.0],
///     "tmax" => [30.0, 32.0, 28.0],
/// ).unwrap();
///
/// let cleaned = clean_and_aggregate(&df, Granularity::State).unwrap();
/// assert_eq!(cleaned.height(), 1);
/// assert_eq!(cleaned.column("rain").unwrap().f64().unwrap().get(0), Some(15.0));
/// ```
pub fn clean_and_aggregate(frame: &DataFrame, granularity: Granularity) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .drop_sentinel_rows()
        .aggregate_to(granularity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> PolarsResult<DataFrame> {
        df!(
            "state" => ["Kerala", "Kerala", "Kerala", "Goa", "Goa", "Assam"],
            "district" => ["Idukki", "Wayanad", "Kollam", "North Goa", "South Goa", "Kamrup"],
            "rain" => [10.0, 30.0, 5.0, -999.0, 8.0, 2.0],
            "tmin" => [20.0, 22.0, -999.0, 19.0, 21.0, 15.0],
            "tmax" => [30.0, 32.0, 31.0, 33.0, 34.0, -999.0],
        )
    }

    #[test]
    fn test_any_sentinel_drops_the_row() -> Result<(), Box<dyn std::error::Error>> {
        let df = clean_and_aggregate(&sample()?, Granularity::District)?;

        let districts: Vec<Option<&str>> = df.column("district")?.str()?.into_iter().collect();
        assert_eq!(districts, [Some("Idukki"), Some("Wayanad"), Some("South Goa")]);
        for name in MEASUREMENT_COLUMNS {
            assert!(df
                .column(name)?
                .f64()?
                .into_iter()
                .all(|v| v != Some(MISSING_SENTINEL)));
        }
        Ok(())
    }

    #[test]
    fn test_district_rows_pass_through() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "state" => ["Goa", "Goa"],
            "district" => ["North Goa", "North Goa"],
            "rain" => [1.0, 2.0],
            "tmin" => [20.0, 21.0],
            "tmax" => [30.0, 31.0],
        )?;
        let cleaned = clean_and_aggregate(&df, Granularity::District)?;
        assert!(cleaned.equals(&df));
        Ok(())
    }

    #[test]
    fn test_state_means() -> Result<(), Box<dyn std::error::Error>> {
        let df = clean_and_aggregate(&sample()?, Granularity::State)?;

        assert_eq!(df.get_column_names(), ["state", "rain", "tmin", "tmax"]);
        assert_eq!(df.height(), 2);

        let states: Vec<Option<&str>> = df.column("state")?.str()?.into_iter().collect();
        assert_eq!(states, [Some("Goa"), Some("Kerala")]);

        let rain = df.column("rain")?.f64()?;
        let tmin = df.column("tmin")?.f64()?;
        let tmax = df.column("tmax")?.f64()?;
        assert_eq!(rain.get(0), Some(8.0));
        assert_eq!(rain.get(1), Some(20.0));
        assert_eq!(tmin.get(1), Some(21.0));
        assert_eq!(tmax.get(1), Some(31.0));
        Ok(())
    }

    #[test]
    fn test_null_only_group_mean_becomes_zero() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "state" => [Some("Goa"), Some("Goa"), None],
            "district" => ["North Goa", "South Goa", "Unknown"],
            "rain" => [Some(4.0), Some(6.0), Some(1.0)],
            "tmin" => [None::<f64>, None, Some(1.0)],
            "tmax" => [Some(30.0), Some(32.0), Some(1.0)],
        )?;
        let out = clean_and_aggregate(&df, Granularity::State)?;

        assert_eq!(out.height(), 1);
        assert_eq!(out.column("rain")?.f64()?.get(0), Some(5.0));
        assert_eq!(out.column("tmin")?.f64()?.get(0), Some(0.0));
        assert_eq!(out.column("tmax")?.f64()?.get(0), Some(31.0));
        Ok(())
    }

    #[test]
    fn test_everything_filtered_gives_empty_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "state" => ["Goa"],
            "district" => ["North Goa"],
            "rain" => [-999.0],
            "tmin" => [20.0],
            "tmax" => [30.0],
        )?;
        assert_eq!(clean_and_aggregate(&df, Granularity::State)?.height(), 0);
        assert_eq!(clean_and_aggregate(&df, Granularity::District)?.height(), 0);
        Ok(())
    }
}
