use crate::chart::error::ChartError;
use crate::chart::figure::{
    Center, Chart, ChoroplethTrace, ColorBar, Layout, Mapbox, Margin, Marker, Title, Trace,
};
use crate::chart::plots::{float_values, text_values};
use crate::geo::reference::GeoReference;
use crate::types::granularity::Granularity;
use crate::types::variable::Variable;
use crate::utils::title_case;
use log::{debug, warn};
use polars::prelude::DataFrame;

pub const MAP_STYLE: &str = "carto-positron";
pub const MAP_ZOOM: f64 = 3.4;
pub const MAP_CENTER: Center = Center {
    lat: 22.9734,
    lon: 78.6569,
};
pub const MAP_OPACITY: f64 = 0.5;

fn color_scale() -> Vec<(f64, String)> {
    vec![
        (0.0, "white".to_string()),
        (0.0001, "lightblue".to_string()),
        (1.0, "darkblue".to_string()),
    ]
}

/// Rescales `values` to [0, 1] by their minimum and maximum.
///
/// Nulls and NaNs are ignored when finding the bounds and stay as they are.
/// When every value is equal, or there is nothing to scale, the input is
/// returned unchanged.
///
/// ```
/// use rainfall_climate::chart::choropleth::normalize_min_max;
///
/// let scaled = normalize_min_max(&[Some(10.0), Some(20.0), Some(30.0)]);
/// assert_eq!(scaled, [Some(0.0), Some(0.5), Some(1.0)]);
/// ```
pub fn normalize_min_max(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let bounds = values
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        });

    match bounds {
        Some((min, max)) if min != max => values
            .iter()
            .map(|v| v.map(|v| (v - min) / (max - min)))
            .collect(),
        _ => values.to_vec(),
    }
}

/// Shades each location by its min-max normalized `variable`.
///
/// Location names are title-cased to match the boundary file. The variable is
/// normalized over all rows before rows without a location are skipped.
/// Locations with no boundary stay in the trace and are logged, since Plotly
/// simply leaves them undrawn.
pub fn plot_choropleth_map(
    frame: &DataFrame,
    granularity: Granularity,
    variable: Variable,
    geo: &GeoReference,
) -> Result<Chart, ChartError> {
    let names = text_values(frame, granularity.location_column())?;
    let raw = float_values(frame, variable.column())?;
    // Bounds come from every row, including rows that have no location.
    let scaled = normalize_min_max(&raw);

    let mut locations = Vec::with_capacity(names.len());
    let mut z = Vec::with_capacity(names.len());
    let mut customdata = Vec::with_capacity(names.len());
    for ((name, value), shade) in names.into_iter().zip(raw).zip(scaled) {
        if let Some(name) = name {
            locations.push(title_case(&name));
            customdata.push(value);
            z.push(shade);
        }
    }
    if locations.len() < frame.height() {
        debug!(
            "Skipped {} rows without a {}",
            frame.height() - locations.len(),
            granularity
        );
    }

    let unmatched: Vec<&str> = locations
        .iter()
        .filter(|name| !geo.contains(name))
        .map(String::as_str)
        .collect();
    if !unmatched.is_empty() {
        warn!(
            "{} {} name(s) have no boundary in the map and will not be drawn: {}",
            unmatched.len(),
            granularity,
            unmatched.join(", ")
        );
    }

    let trace = ChoroplethTrace {
        geojson: geo.as_geojson().clone(),
        featureidkey: geo.feature_id_key(),
        z,
        customdata,
        hovertemplate: format!(
            "%{{location}}<br>{}=%{{customdata}}<extra></extra>",
            variable.column()
        ),
        locations,
        colorscale: color_scale(),
        marker: Marker {
            opacity: Some(MAP_OPACITY),
            ..Marker::default()
        },
        colorbar: ColorBar {
            title: Title::new(format!("{} (normalized)", variable.label())),
        },
    };
    let layout = Layout {
        margin: Some(Margin::default()),
        mapbox: Some(Mapbox {
            style: MAP_STYLE.to_string(),
            zoom: MAP_ZOOM,
            center: MAP_CENTER,
        }),
        ..Layout::default()
    };
    Ok(Chart::new(Trace::Choroplethmapbox(trace), layout)?)
}
