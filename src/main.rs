//! rainfall-dash: render rainfall and temperature charts from the command line.

use clap::{Args, Parser, Subcommand};
use chrono::NaiveDate;
use dotenv::dotenv;
use log::info;
use polars::prelude::*;
use rainfall_climate::{
    Dashboard, DashboardConfig, DashboardOutcome, Frequency, Granularity, PlotType,
    ReferenceDate, SelectionError, Variable, DEFAULT_APPEND_TABLE, NO_DATA_MESSAGE,
};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "rainfall-dash",
    version,
    about = "Indian district rainfall and temperature dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query observations and render one chart
    Plot(PlotArgs),

    /// Append the rows of a CSV file to an observation table
    Load {
        /// CSV file with a header row; its columns must exist in the table
        csv: PathBuf,

        #[arg(long, default_value = DEFAULT_APPEND_TABLE)]
        table: String,
    },
}

#[derive(Args)]
struct PlotArgs {
    #[arg(long, default_value = "state")]
    granularity: Granularity,

    #[arg(long, default_value = "daily")]
    frequency: Frequency,

    /// Shaded on the choropleth map; other charts always plot rain
    #[arg(long, default_value = "rain")]
    variable: Variable,

    /// choropleth_mapbox, barchart, scatter, histogram, boxplot, heatmap, "count chart" or "line chart"
    #[arg(long = "plot", default_value = "choropleth_mapbox")]
    plot_type: PlotType,

    /// Day to show for daily data (YYYY-MM-DD) [default: 2023-01-01]
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Year for monthly and yearly data [default: 2018]
    #[arg(long)]
    year: Option<i32>,

    /// Month abbreviation for monthly data, e.g. Jul [default: Jan]
    #[arg(long)]
    month: Option<String>,

    /// Output file [default: chart.html, or chart.json with --json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write Plotly figure JSON instead of an HTML page
    #[arg(long)]
    json: bool,

    /// Print the cleaned table the chart was drawn from
    #[arg(long)]
    show_data: bool,

    /// State boundaries, overriding RAINFALL_STATE_GEOJSON
    #[arg(long)]
    state_geojson: Option<PathBuf>,

    /// District boundaries, overriding RAINFALL_DISTRICT_GEOJSON
    #[arg(long)]
    district_geojson: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::from_env();
    match cli.command {
        Command::Plot(args) => run_plot(config, args).await,
        Command::Load { csv, table } => run_load(config, &csv, &table).await,
    }
}

async fn run_plot(mut config: DashboardConfig, args: PlotArgs) -> Result<(), Box<dyn Error>> {
    if let Some(path) = args.state_geojson {
        config = config.with_state_geojson(path);
    }
    if let Some(path) = args.district_geojson {
        config = config.with_district_geojson(path);
    }

    let reference = ReferenceDate::from_selection(
        args.frequency,
        args.date,
        args.year,
        args.month.as_deref(),
    )?;
    let date = reference
        .start_date()
        .ok_or_else(|| SelectionError::InvalidDate(reference.to_string()))?;
    info!("Rendering {} of {} data for {}", args.plot_type, args.frequency, reference);

    let dashboard = Dashboard::new(config.store(), config.geo_catalog());
    let outcome = dashboard
        .render()
        .granularity(args.granularity)
        .frequency(args.frequency)
        .date(date)
        .plot_type(args.plot_type)
        .variable(args.variable)
        .call()
        .await?;

    let (chart, data) = match outcome {
        DashboardOutcome::NoData => {
            println!("{}", NO_DATA_MESSAGE);
            return Ok(());
        }
        DashboardOutcome::Chart { chart, data } => (chart, data),
    };

    if args.show_data {
        println!("Fetched Data:\n{}", data);
    }

    let (contents, default_output) = if args.json {
        (chart.to_json()?, "chart.json")
    } else {
        (chart.to_html()?, "chart.html")
    };
    let output = args.output.unwrap_or_else(|| PathBuf::from(default_output));
    tokio::fs::write(&output, contents).await?;
    println!("Wrote {}", output.display());
    Ok(())
}

async fn run_load(config: DashboardConfig, csv: &Path, table: &str) -> Result<(), Box<dyn Error>> {
    let path = csv.to_path_buf();
    let frame = tokio::task::spawn_blocking(move || {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path))?
            .finish()
    })
    .await??;
    info!("Read {} rows from {}", frame.height(), csv.display());

    let rows = config.store().try_store_data(&frame, table).await?;
    println!("Stored {} rows in {}", rows, table);
    Ok(())
}
