//! CLI entry point for the bike-share traffic tool.
//!
//! Provides subcommands for station traffic at a time of day, a full-day
//! sweep written to CSV, and the slider time label.

use anyhow::Result;
use bikeshare_traffic::{
    config::Sources,
    dataset::{self, Dataset},
    fetch::BasicClient,
    output::{
        print_pretty, write_csv, write_json, write_sweep_csv, write_table, write_traffic_csv,
    },
    sweep::sweep,
    time_filter::{MINUTES_PER_DAY, TimeFilter},
    view::TrafficView,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_traffic")]
#[command(about = "Per-station bike-share traffic by time of day", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Markers,
    Csv,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Station JSON document (path or URL)
    #[arg(long, value_name = "FILE_OR_URL")]
    stations: Option<String>,

    /// Trip CSV export, optionally gzipped (path or URL)
    #[arg(long, value_name = "FILE_OR_URL")]
    trips: Option<String>,

    /// JSON file naming both sources; flags above take precedence
    #[arg(long, value_name = "FILE")]
    sources: Option<String>,
}

impl SourceArgs {
    fn resolve(self) -> Result<Sources> {
        let base = match &self.sources {
            Some(path) => Sources::load(path)?,
            None => Sources::from_env(),
        };
        Ok(base.with_overrides(self.stations, self.trips))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Count departures and arrivals per station
    Traffic {
        #[command(flatten)]
        sources: SourceArgs,

        /// Time of day to centre the ±60 minute window on: `any`, `-1`,
        /// minutes since midnight, or HH:MM
        #[arg(short, long, default_value = "any", allow_hyphen_values = true)]
        time: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Step the time filter across the day and write per-station rows to a CSV
    Sweep {
        #[command(flatten)]
        sources: SourceArgs,

        /// Minutes between steps
        #[arg(
            short,
            long,
            default_value_t = 60,
            value_parser = clap::value_parser!(i32).range(1..=MINUTES_PER_DAY as i64)
        )]
        step: i32,

        /// CSV file to write results to, replacing any earlier run
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
    /// Print the display label for a slider value
    FormatTime {
        /// Minutes since midnight, or -1 for any time
        #[arg(allow_hyphen_values = true)]
        minutes: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Traffic {
            sources,
            time,
            format,
            output,
        } => {
            let filter = TimeFilter::parse(&time)?;
            let data = load(sources).await?;
            traffic(data, filter, format, output.as_deref())?;
        }
        Commands::Sweep {
            sources,
            step,
            output,
        } => {
            let data = load(sources).await?;
            run_sweep(&data, step, &output)?;
        }
        Commands::FormatTime { minutes } => {
            let filter = TimeFilter::from_slider(minutes)?;
            println!("{}", filter.label());
        }
    }

    Ok(())
}

/// Fetches stations and trips; a failure is logged before it ends the run.
async fn load(args: SourceArgs) -> Result<Dataset> {
    let sources = args.resolve()?;
    let client = BasicClient::new()?;

    dataset::load(&client, &sources).await.inspect_err(|e| {
        error!(error = %e, "Error loading station or trip data");
    })
}

#[tracing::instrument(skip_all, fields(filter = %filter))]
fn traffic(data: Dataset, filter: TimeFilter, format: Format, output: Option<&str>) -> Result<()> {
    let mut view = TrafficView::new(data.stations, data.trips);
    view.set_time_filter(filter);

    let summary = view.summary();
    info!(
        time = %view.time_label(),
        trips = view.trip_count(),
        stations = summary.stations,
        active_stations = summary.active_stations,
        departures = summary.departures,
        arrivals = summary.arrivals,
        busiest = summary.busiest_station.as_deref().unwrap_or("-"),
        busiest_total = summary.busiest_total,
        "Traffic computed"
    );
    print_pretty(view.traffic());

    match (format, output) {
        (Format::Csv, Some(path)) => write_traffic_csv(path, view.traffic())?,
        (format, Some(path)) => write_to(std::fs::File::create(path)?, &view, format)?,
        (format, None) => write_to(std::io::stdout().lock(), &view, format)?,
    }

    Ok(())
}

fn write_to<W: std::io::Write>(out: W, view: &TrafficView, format: Format) -> Result<()> {
    match format {
        Format::Table => write_table(out, view.traffic()),
        Format::Json => write_json(out, &view.traffic()),
        Format::Markers => write_json(out, &view.markers()),
        Format::Csv => write_csv(out, view.traffic()),
    }
}

#[tracing::instrument(skip(data))]
fn run_sweep(data: &Dataset, step: i32, output: &str) -> Result<()> {
    let records = sweep(&data.stations, &data.trips, step)?;
    write_sweep_csv(output, &records)?;

    info!(output, rows = records.len(), "Sweep complete");
    Ok(())
}
