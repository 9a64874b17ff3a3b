//! One dashboard interaction: query, clean, aggregate and chart.

use crate::chart::dispatch::ChartDispatcher;
use crate::chart::figure::Chart;
use crate::error::RainfallError;
use crate::geo::catalog::GeoCatalog;
use crate::processing::cleaning::clean_and_aggregate;
use crate::store::ObservationSource;
use crate::types::frequency::Frequency;
use crate::types::granularity::Granularity;
use crate::types::plot_type::PlotType;
use crate::types::variable::Variable;
use bon::bon;
use chrono::NaiveDate;
use log::info;
use polars::prelude::DataFrame;

/// Shown in place of a chart when the query produced nothing to plot.
pub const NO_DATA_MESSAGE: &str = "No data found or an error occurred while querying.";

/// The result of one interaction.
#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    /// A chart together with the cleaned table it was drawn from.
    Chart { chart: Chart, data: DataFrame },
    /// The store returned no result or zero rows. No chart was built.
    NoData,
}

impl DashboardOutcome {
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            DashboardOutcome::Chart { chart, .. } => Some(chart),
            DashboardOutcome::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, DashboardOutcome::NoData)
    }
}

/// Wires an [`ObservationSource`] to the cleaning stage and the chart dispatcher.
///
/// Create one per process and call [`Dashboard::render`] once per user
/// interaction. Boundary files are cached inside the [`GeoCatalog`], so a
/// long-lived dashboard reads each of them at most once.
///
/// # Examples
///
/// ```rust
/// # use rainfall_climate::{Dashboard, DashboardOutcome, FrameStore, GeoCatalog};
/// # use rainfall_climate::{Frequency, Granularity, PlotType, RainfallError};
/// # use chrono::NaiveDate;
/// # use polars::prelude::*;
/// #
/// # #[tokio::main]
/// # async fn main() -> Result<(), RainfallError> {
/// let yearly = df!(
///     "year" => [2020i32, 2020],
///     "state" => ["Goa", "Goa"],
///     "district" => ["North Goa", "South Goa"],
///     "rain" => [3000.0, 3200.0],
///     "tmin" => [22.0, 23.0],
///     "tmax" => [32.0, 33.0],
/// )?;
/// let store = FrameStore::new().with_table(Frequency::Yearly, yearly);
/// let dashboard = Dashboard::new(store, GeoCatalog::new("states.geojson", "districts.geojson"));
///
/// let outcome = dashboard
///     .render()
///     .granularity(Granularity::State)
///     .frequency(Frequency::Yearly)
///     .date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
///     .plot_type(PlotType::BarChart)
///     .call()
///     .await?;
///
/// if let DashboardOutcome::Chart { data, .. } = outcome {
///     assert_eq!(data.height(), 1);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Dashboard<S> {
    source: S,
    geo: GeoCatalog,
}

#[bon]
impl<S: ObservationSource> Dashboard<S> {
    pub fn new(source: S, geo: GeoCatalog) -> Self {
        Self { source, geo }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn geo(&self) -> &GeoCatalog {
        &self.geo
    }

    /// Runs one interaction.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.granularity(Granularity)`: **Required.** State rows are averaged per state; district rows are plotted as they are.
    /// * `.frequency(Frequency)`: **Required.** Selects the daily, monthly or yearly table.
    /// * `.date(NaiveDate)`: **Required.** Only the parts relevant to `frequency` are used.
    /// * `.plot_type(PlotType)`: **Required.** The chart to build.
    /// * `.variable(Variable)`: Optional. Shaded on the choropleth map. Defaults to [`Variable::Rain`]; other charts ignore it.
    ///
    /// # Errors
    ///
    /// Query failures are not errors: they are logged by the source and end in
    /// [`DashboardOutcome::NoData`], like an empty result. Errors come from the
    /// chart stage, e.g. [`RainfallError::Chart`] when the boundary file for a
    /// choropleth cannot be read.
    #[builder]
    pub async fn render(
        &self,
        granularity: Granularity,
        frequency: Frequency,
        date: NaiveDate,
        plot_type: PlotType,
        #[builder(default)] variable: Variable,
    ) -> Result<DashboardOutcome, RainfallError> {
        let raw = match self.source.query_table(date, frequency).await {
            Some(frame) if frame.height() > 0 => frame,
            _ => {
                info!("{}", NO_DATA_MESSAGE);
                return Ok(DashboardOutcome::NoData);
            }
        };

        let data = clean_and_aggregate(&raw, granularity)?;
        info!(
            "Fetched {} rows, {} after cleaning at {} level",
            raw.height(),
            data.height(),
            granularity
        );

        let chart = ChartDispatcher::new(&self.geo)
            .render(&data, granularity, plot_type, variable)
            .await?;
        Ok(DashboardOutcome::Chart { chart, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::FrameStore;
    use polars::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed result and counts how often it was asked.
    struct FixedSource {
        result: Option<DataFrame>,
        calls: AtomicUsize,
    }

    impl ObservationSource for FixedSource {
        async fn query_table(&self, _date: NaiveDate, _frequency: Frequency) -> Option<DataFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn unreadable_geo() -> GeoCatalog {
        GeoCatalog::new("missing-states.geojson", "missing-districts.geojson")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    async fn render_map(source: FixedSource) -> Result<(DashboardOutcome, usize), RainfallError> {
        // A choropleth over unreadable boundaries fails if the chart stage runs.
        let dashboard = Dashboard::new(source, unreadable_geo());
        let outcome = dashboard
            .render()
            .granularity(Granularity::District)
            .frequency(Frequency::Daily)
            .date(date())
            .plot_type(PlotType::Choropleth)
            .call()
            .await?;
        Ok((outcome, dashboard.source().calls.load(Ordering::SeqCst)))
    }

    #[tokio::test]
    async fn test_null_result_is_no_data() -> Result<(), Box<dyn std::error::Error>> {
        let (outcome, calls) = render_map(FixedSource {
            result: None,
            calls: AtomicUsize::new(0),
        })
        .await?;

        assert!(outcome.is_no_data());
        assert!(outcome.chart().is_none());
        assert_eq!(calls, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_result_is_no_data() -> Result<(), Box<dyn std::error::Error>> {
        let empty = df!(
            "state" => Vec::<String>::new(),
            "district" => Vec::<String>::new(),
            "rain" => Vec::<f64>::new(),
            "tmin" => Vec::<f64>::new(),
            "tmax" => Vec::<f64>::new(),
        )?;
        let (outcome, _) = render_map(FixedSource {
            result: Some(empty),
            calls: AtomicUsize::new(0),
        })
        .await?;

        assert!(outcome.is_no_data());
        Ok(())
    }

    #[tokio::test]
    async fn test_rows_reach_the_chart_stage() {
        let rows = df!(
            "state" => ["Goa"],
            "district" => ["North Goa"],
            "rain" => [10.0],
            "tmin" => [20.0],
            "tmax" => [30.0],
        )
        .unwrap();
        let result = render_map(FixedSource {
            result: Some(rows),
            calls: AtomicUsize::new(0),
        })
        .await;

        assert!(matches!(result, Err(RainfallError::Chart(_))));
    }

    #[tokio::test]
    async fn test_monthly_state_barchart() -> Result<(), Box<dyn std::error::Error>> {
        let monthly = df!(
            "year" => [2021i32, 2021, 2021, 2021],
            "month" => ["jul", "JUL", "Jul", "aug"],
            "state" => ["KERALA", "KERALA", "GOA", "GOA"],
            "district" => ["IDUKKI", "WAYANAD", "NORTH GOA", "NORTH GOA"],
            "rain" => [600.0, 400.0, -999.0, 90.0],
            "tmin" => [20.0, 21.0, 22.0, 23.0],
            "tmax" => [30.0, 31.0, 32.0, 33.0],
        )?;
        let dashboard = Dashboard::new(
            FrameStore::new().with_table(Frequency::Monthly, monthly),
            unreadable_geo(),
        );

        let outcome = dashboard
            .render()
            .granularity(Granularity::State)
            .frequency(Frequency::Monthly)
            .date(NaiveDate::from_ymd_opt(2021, 7, 1).unwrap())
            .plot_type(PlotType::BarChart)
            .variable(Variable::Tmax)
            .call()
            .await?;

        let DashboardOutcome::Chart { chart, data } = outcome else {
            panic!("expected a chart");
        };
        // GOA's July row carries the sentinel; its August row is another month.
        assert_eq!(data.height(), 1);
        let trace = chart.trace().ok_or("chart without a trace")?;
        assert_eq!(trace["type"], "bar");
        assert_eq!(trace["x"], serde_json::json!(["KERALA"]));
        assert_eq!(trace["y"], serde_json::json!([500.0]));
        Ok(())
    }
}
