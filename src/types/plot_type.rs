//! Defines the `PlotType` enum, one variant per supported chart.

use crate::types::error::SelectionError;
use std::fmt;
use std::str::FromStr;

/// The kind of chart to build from a cleaned observation table.
///
/// Names are parsed leniently: case is ignored and spaces, dashes and
/// underscores are interchangeable, so `"count chart"`, `"count-chart"` and
/// `"COUNT_CHART"` all resolve to [`PlotType::CountChart`]. The original
/// dashboard label `"choropleth_mapbox"` is accepted for [`PlotType::Choropleth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlotType {
    /// Regions shaded by the min-max normalized selected variable.
    #[default]
    Choropleth,
    /// Rainfall per location as bars.
    BarChart,
    /// Rainfall per location as points colored by rainfall.
    Scatter,
    /// Distribution of rainfall values.
    Histogram,
    /// Rainfall spread per location.
    BoxPlot,
    /// Two-dimensional density of rainfall per location.
    Heatmap,
    /// Number of rows per location.
    CountChart,
    /// Rainfall per location joined by lines, in input order.
    LineChart,
}

impl PlotType {
    pub const ALL: [PlotType; 8] = [
        PlotType::Choropleth,
        PlotType::BarChart,
        PlotType::Scatter,
        PlotType::Histogram,
        PlotType::BoxPlot,
        PlotType::Heatmap,
        PlotType::CountChart,
        PlotType::LineChart,
    ];

    /// The label shown in the plot type selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::Choropleth => "choropleth_mapbox",
            PlotType::BarChart => "barchart",
            PlotType::Scatter => "scatter",
            PlotType::Histogram => "histogram",
            PlotType::BoxPlot => "boxplot",
            PlotType::Heatmap => "heatmap",
            PlotType::CountChart => "count chart",
            PlotType::LineChart => "line chart",
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlotType {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match key.as_str() {
            "choropleth" | "choropleth_mapbox" | "map" => Ok(PlotType::Choropleth),
            "barchart" | "bar_chart" | "bar" => Ok(PlotType::BarChart),
            "scatter" => Ok(PlotType::Scatter),
            "histogram" => Ok(PlotType::Histogram),
            "boxplot" | "box_plot" | "box" => Ok(PlotType::BoxPlot),
            "heatmap" | "heat_map" => Ok(PlotType::Heatmap),
            "count_chart" | "countchart" | "count" => Ok(PlotType::CountChart),
            "line_chart" | "linechart" | "line" => Ok(PlotType::LineChart),
            _ => Err(SelectionError::UnknownPlotType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_labels_parse_back() -> Result<(), SelectionError> {
        for plot_type in PlotType::ALL {
            assert_eq!(plot_type.as_str().parse::<PlotType>()?, plot_type);
        }
        Ok(())
    }

    #[test]
    fn test_lenient_names() -> Result<(), SelectionError> {
        assert_eq!("count-chart".parse::<PlotType>()?, PlotType::CountChart);
        assert_eq!("Line Chart".parse::<PlotType>()?, PlotType::LineChart);
        assert_eq!("choropleth".parse::<PlotType>()?, PlotType::Choropleth);
        assert_eq!("BOX_PLOT".parse::<PlotType>()?, PlotType::BoxPlot);
        Ok(())
    }

    #[test]
    fn test_unknown_plot_type() {
        assert!(matches!(
            "pie".parse::<PlotType>(),
            Err(SelectionError::UnknownPlotType(_))
        ));
    }
}
