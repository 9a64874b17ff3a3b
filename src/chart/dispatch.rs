use crate::chart::choropleth::plot_choropleth_map;
use crate::chart::error::ChartError;
use crate::chart::figure::Chart;
use crate::chart::plots::{
    plot_barchart, plot_boxplot, plot_count_chart, plot_heatmap, plot_histogram,
    plot_line_chart, plot_scatter,
};
use crate::geo::catalog::GeoCatalog;
use crate::types::granularity::Granularity;
use crate::types::plot_type::PlotType;
use crate::types::variable::Variable;
use log::debug;
use polars::prelude::DataFrame;

/// Routes a cleaned table to the renderer for the selected [`PlotType`].
///
/// Boundaries are only loaded for [`PlotType::Choropleth`]; every other
/// chart ignores `variable` and plots `rain`.
pub struct ChartDispatcher<'a> {
    geo: &'a GeoCatalog,
}

impl<'a> ChartDispatcher<'a> {
    pub fn new(geo: &'a GeoCatalog) -> Self {
        Self { geo }
    }

    pub async fn render(
        &self,
        frame: &DataFrame,
        granularity: Granularity,
        plot_type: PlotType,
        variable: Variable,
    ) -> Result<Chart, ChartError> {
        debug!(
            "Rendering {} for {} rows at {} level",
            plot_type,
            frame.height(),
            granularity
        );
        match plot_type {
            PlotType::Choropleth => {
                let geo = self.geo.get(granularity).await?;
                plot_choropleth_map(frame, granularity, variable, &geo)
            }
            PlotType::BarChart => plot_barchart(frame, granularity),
            PlotType::Scatter => plot_scatter(frame, granularity),
            PlotType::Histogram => plot_histogram(frame),
            PlotType::BoxPlot => plot_boxplot(frame, granularity),
            PlotType::Heatmap => plot_heatmap(frame, granularity),
            PlotType::CountChart => plot_count_chart(frame, granularity),
            PlotType::LineChart => plot_line_chart(frame, granularity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::error::GeoError;
    use polars::prelude::*;
    use serde_json::json;

    fn frame() -> PolarsResult<DataFrame> {
        df!(
            "state" => ["Goa", "Kerala"],
            "rain" => [12.0, 40.0],
            "tmin" => [20.0, 21.0],
            "tmax" => [31.0, 29.0],
        )
    }

    #[tokio::test]
    async fn test_every_chart_plots_rain() -> Result<(), Box<dyn std::error::Error>> {
        let geo = GeoCatalog::new("missing-states.geojson", "missing-districts.geojson");
        let dispatcher = ChartDispatcher::new(&geo);
        let df = frame()?;

        for plot_type in PlotType::ALL {
            if plot_type == PlotType::Choropleth {
                continue;
            }
            let chart = dispatcher
                .render(&df, Granularity::State, plot_type, Variable::Tmax)
                .await?;
            let trace = chart.trace().ok_or("chart without a trace")?;
            let values = match plot_type {
                PlotType::Histogram => &trace["x"],
                _ => &trace["y"],
            };
            if plot_type == PlotType::CountChart {
                assert_eq!(values, &json!([1.0, 1.0]));
            } else {
                assert_eq!(values, &json!([12.0, 40.0]), "{plot_type}");
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_choropleth_needs_boundaries() -> Result<(), Box<dyn std::error::Error>> {
        let geo = GeoCatalog::new("missing-states.geojson", "missing-districts.geojson");
        let result = ChartDispatcher::new(&geo)
            .render(&frame()?, Granularity::State, PlotType::Choropleth, Variable::Rain)
            .await;

        assert!(matches!(result, Err(ChartError::Geo(GeoError::Read(..)))));
        Ok(())
    }
}
