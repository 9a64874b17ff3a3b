//! Plotly figures: the output of every chart.
//!
//! Most charts are drawn with plotlars and their figure is taken over as JSON.
//! Traces plotlars has no builder for (a mapbox choropleth, a density heatmap
//! and a scatter colored by value on a categorical axis) are described by the
//! serializable [`Trace`] subset below.

use plotlars::Plot;
use serde::Serialize;
use serde_json::{json, Value};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// One rendered chart: Plotly traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    data: Vec<Value>,
    layout: Value,
}

impl Chart {
    pub fn new(trace: Trace, layout: Layout) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: vec![serde_json::to_value(trace)?],
            layout: serde_json::to_value(layout)?,
        })
    }

    /// Takes over the traces and layout of a plotlars plot.
    pub fn from_plot(plot: &impl Plot) -> Result<Self, serde_json::Error> {
        let mut figure: Value = serde_json::from_str(&plot.to_json()?)?;
        let data = match figure.get_mut("data").map(Value::take) {
            Some(Value::Array(traces)) => traces,
            _ => Vec::new(),
        };
        let layout = match figure.get_mut("layout").map(Value::take) {
            Some(layout @ Value::Object(_)) => layout,
            _ => json!({}),
        };
        Ok(Self { data, layout })
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn layout(&self) -> &Value {
        &self.layout
    }

    pub fn trace(&self) -> Option<&Value> {
        self.data.first()
    }

    pub fn title(&self) -> Option<&str> {
        match &self.layout["title"] {
            Value::String(text) => Some(text),
            title => title["text"].as_str(),
        }
    }

    /// Plotly figure JSON, `{"data": [...], "layout": {...}}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_value(&self) -> Value {
        json!({ "data": self.data, "layout": self.layout })
    }

    /// A standalone HTML page drawing the chart with plotly.js from the CDN.
    pub fn to_html(&self) -> Result<String, serde_json::Error> {
        // Keep "</script>" inside string values from closing the script tag.
        let figure = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:100vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Always drawn as markers.
    Scatter {
        x: Vec<Option<String>>,
        y: Vec<Option<f64>>,
        mode: &'static str,
        marker: Marker,
    },
    Histogram2d {
        x: Vec<Option<String>>,
        y: Vec<Option<f64>>,
    },
    Choroplethmapbox(ChoroplethTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub geojson: Value,
    pub featureidkey: String,
    pub locations: Vec<String>,
    pub z: Vec<Option<f64>>,
    /// Raw values shown on hover next to the normalized shading.
    pub customdata: Vec<Option<f64>>,
    pub hovertemplate: String,
    pub colorscale: Vec<(f64, String)>,
    pub marker: Marker,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    /// One value per point, mapped through the color scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub zoom: f64,
    pub center: Center,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
}

impl Layout {
    /// A titled layout with labelled axes.
    pub fn titled(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(title)),
            xaxis: Some(Axis::titled(x)),
            yaxis: Some(Axis::titled(y)),
            ..Self::default()
        }
    }
}
