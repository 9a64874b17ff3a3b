//! The statistical charts. Each plots `rain` against the location column.

use crate::chart::error::ChartError;
use crate::chart::figure::{Chart, Layout, Marker, Trace};
use crate::types::granularity::Granularity;
use plotlars::{BarPlot, BoxPlot, Histogram, Orientation, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;

const RAIN: &str = "rain";
const RAIN_BLUE: Rgb = Rgb(0, 0, 255);
pub const COUNT_COLUMN: &str = "count";

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, ChartError> {
    frame
        .column(name)
        .map_err(|e| ChartError::MissingColumn(name.to_string(), e))
}

/// plotlars panics on an unknown column, so every plotted column is checked first.
fn require(frame: &DataFrame, names: &[&str]) -> Result<(), ChartError> {
    for name in names {
        column(frame, name)?;
    }
    Ok(())
}

pub(crate) fn text_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ChartError> {
    let values = column(frame, name)?.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

pub(crate) fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ChartError> {
    let values = column(frame, name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

/// Rows per distinct value of `column`, as `[column, count]` ordered by value.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use rainfall_climate::chart::plots::count_by;
///
/// let df = df!("district" => ["A", "B", "A", "A"]).unwrap();
/// let counts = count_by(&df, "district").unwrap();
///
/// assert_eq!(counts.column("count").unwrap().i64().unwrap().get(0), Some(3));
/// ```
pub fn count_by(frame: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .group_by([col(column)])
        .agg([len().cast(DataType::Int64).alias(COUNT_COLUMN)])
        .sort_by_exprs([col(column)], SortMultipleOptions::default())
        .collect()
}

pub fn plot_barchart(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let location = granularity.location_column();
    require(frame, &[location, RAIN])?;

    let title = format!("Rainfall by {}", granularity.label());
    let plot = BarPlot::builder()
        .data(frame)
        .labels(location)
        .values(RAIN)
        .orientation(Orientation::Vertical)
        .colors(vec![RAIN_BLUE])
        .plot_title(Text::from(title.as_str()))
        .x_title(Text::from(granularity.label()))
        .y_title(Text::from("Rainfall (mm)"))
        .build();
    Ok(Chart::from_plot(&plot)?)
}

/// Points colored by their own rainfall.
///
/// Drawn as a raw trace: plotlars scatter plots need a numeric x axis and
/// only color by group.
pub fn plot_scatter(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let rain = float_values(frame, RAIN)?;
    let trace = Trace::Scatter {
        x: text_values(frame, granularity.location_column())?,
        y: rain.clone(),
        mode: "markers",
        marker: Marker {
            color: Some(rain),
            showscale: Some(true),
            ..Marker::default()
        },
    };
    Ok(Chart::new(
        trace,
        Layout::titled("Scatter Plot of Rainfall", granularity.as_str(), RAIN),
    )?)
}

pub fn plot_histogram(frame: &DataFrame) -> Result<Chart, ChartError> {
    require(frame, &[RAIN])?;

    let plot = Histogram::builder()
        .data(frame)
        .x(RAIN)
        .plot_title(Text::from("Histogram of Rainfall"))
        .x_title(Text::from(RAIN))
        .y_title(Text::from("count"))
        .build();
    Ok(Chart::from_plot(&plot)?)
}

pub fn plot_boxplot(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let location = granularity.location_column();
    require(frame, &[location, RAIN])?;

    let plot = BoxPlot::builder()
        .data(frame)
        .labels(location)
        .values(RAIN)
        .orientation(Orientation::Vertical)
        .plot_title(Text::from("Box Plot of Rainfall"))
        .x_title(Text::from(granularity.as_str()))
        .y_title(Text::from(RAIN))
        .build();
    Ok(Chart::from_plot(&plot)?)
}

/// Density of rainfall values per location, binned by plotly.js.
///
/// plotlars heatmaps take a precomputed z grid, so the binning trace is
/// written directly.
pub fn plot_heatmap(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let trace = Trace::Histogram2d {
        x: text_values(frame, granularity.location_column())?,
        y: float_values(frame, RAIN)?,
    };
    Ok(Chart::new(
        trace,
        Layout::titled("Heatmap of Rainfall", granularity.as_str(), RAIN),
    )?)
}

pub fn plot_count_chart(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let location = granularity.location_column();
    require(frame, &[location])?;
    let counts = count_by(frame, location)?;

    let plot = BarPlot::builder()
        .data(&counts)
        .labels(location)
        .values(COUNT_COLUMN)
        .orientation(Orientation::Vertical)
        .plot_title(Text::from("Count Chart"))
        .x_title(Text::from(location))
        .y_title(Text::from(COUNT_COLUMN))
        .build();
    Ok(Chart::from_plot(&plot)?)
}

/// Rainfall joined by lines in row order; the rows are not sorted first.
pub fn plot_line_chart(frame: &DataFrame, granularity: Granularity) -> Result<Chart, ChartError> {
    let location = granularity.location_column();
    require(frame, &[location, RAIN])?;

    let plot = TimeSeriesPlot::builder()
        .data(frame)
        .x(location)
        .y(RAIN)
        .colors(vec![RAIN_BLUE])
        .plot_title(Text::from("Line Chart of Rainfall"))
        .x_title(Text::from(granularity.as_str()))
        .y_title(Text::from(RAIN))
        .build();
    Ok(Chart::from_plot(&plot)?)
}
